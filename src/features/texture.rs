/// Reference to a texture owned by the runtime.
///
/// Only the name is kept; nothing in shader generation reads texture data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef {
    pub name: String,
}

impl TextureRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
