//! Structural validation of generated module text.
//!
//! The Parasol compiler is external, so generated modules are checked here
//! against the grammar the synthesizer emits: one statement per line, a
//! single fragment shader and a single program per module.

use std::collections::HashSet;

use anyhow::{Context, Result, anyhow, bail};

/// Prefixes of identifiers that must be declared as an input or parameter.
const DECLARED_PREFIXES: &[&str] = &["f_", "p_", "t_", "m_"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutline {
    pub package: String,
    pub module: String,
    pub imports: Vec<String>,
    pub fragment: FragmentOutline,
    pub program: ProgramOutline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentOutline {
    pub name: String,
    pub inputs: Vec<String>,
    pub parameters: Vec<String>,
    pub outputs: Vec<OutputDecl>,
    /// Value bindings in order.
    pub values: Vec<String>,
    pub discards: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDecl {
    pub name: String,
    pub ty: String,
    /// Attachment index; `None` for the depth output.
    pub location: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramOutline {
    pub name: String,
    pub vertex: String,
    pub fragment: String,
}

/// Validate module text and return its outline.
///
/// # Example
/// ```ignore
/// let module = synthesize(&case, &Packaging::default());
/// let outline = validate_module_text(&module.source)?;
/// assert_eq!(outline.module, module.name);
/// ```
pub fn validate_module_text(source: &str) -> Result<ModuleOutline> {
    parse_module(source).map_err(|e| {
        anyhow!(
            "shader module validation failed:\n  {e}\n{}",
            numbered_listing(source)
        )
    })
}

/// Validate module text, naming what generated it in the error.
pub fn validate_module_text_with_context(source: &str, context: &str) -> Result<ModuleOutline> {
    validate_module_text(source).with_context(|| format!("{context} generated an invalid module"))
}

fn numbered_listing(source: &str) -> String {
    let mut output = String::from("\nGenerated module:\n---\n");
    for (line_num, line) in source.lines().enumerate() {
        output.push_str(&format!("{:4} | {}\n", line_num + 1, line));
    }
    output.push_str("---\n");
    output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Start,
    Package,
    Module,
    Declarations,
    Values,
    Outputs,
    Program,
    Done,
}

/// A statement whose right-hand side references other bindings.
struct Expr<'a> {
    line: usize,
    /// Value bound by this statement, if any.
    binds: Option<&'a str>,
    rhs: &'a str,
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_qualified_ident(s: &str) -> bool {
    s.split('.').all(is_ident)
}

/// Free identifiers of an expression. Members after `.` (module functions,
/// record fields) are skipped.
fn identifiers(expr: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = None;
    let mut after_dot = false;
    for (i, c) in expr.char_indices().chain(std::iter::once((expr.len(), ' '))) {
        if c.is_ascii_alphanumeric() || c == '_' {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            let token = &expr[s..i];
            if !after_dot && is_ident(token) {
                out.push(token);
            }
        }
        after_dot = c == '.';
    }
    out
}

/// Parses `NAME : TYPE` or `NAME : TYPE as N`, without the trailing `;`.
fn parse_typed_decl(rest: &str) -> Result<(String, String, Option<u32>)> {
    let (name, tail) = rest
        .split_once(" : ")
        .ok_or_else(|| anyhow!("expected `name : type`, got `{rest}`"))?;
    let (ty, location) = match tail.split_once(" as ") {
        Some((ty, loc)) => {
            let loc: u32 = loc
                .parse()
                .map_err(|e| anyhow!("invalid output location `{loc}`: {e}"))?;
            (ty, Some(loc))
        }
        None => (tail, None),
    };
    if !is_ident(name) {
        bail!("invalid identifier `{name}`");
    }
    if !is_qualified_ident(ty) {
        bail!("invalid type `{ty}`");
    }
    Ok((name.to_string(), ty.to_string(), location))
}

fn statement<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.strip_prefix(keyword)?.strip_suffix(';')
}

fn parse_module(source: &str) -> Result<ModuleOutline> {
    let mut section = Section::Start;
    let mut package = String::new();
    let mut module = String::new();
    let mut imports = Vec::new();
    let mut fragment = FragmentOutline::default();
    let mut program = ProgramOutline::default();
    let mut saw_fragment = false;
    let mut exprs: Vec<Expr<'_>> = Vec::new();
    let mut assigned_outputs: Vec<(usize, &str)> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        let at = |msg: String| anyhow!("line {line_num}: {msg}");

        match section {
            Section::Start => {
                let name = statement(line, "package ")
                    .ok_or_else(|| at(format!("expected package declaration, got `{line}`")))?;
                if !is_qualified_ident(name) {
                    return Err(at(format!("invalid package name `{name}`")));
                }
                package = name.to_string();
                section = Section::Package;
            }
            Section::Package => {
                let name = line
                    .strip_prefix("module ")
                    .and_then(|l| l.strip_suffix(" is"))
                    .ok_or_else(|| at(format!("expected module declaration, got `{line}`")))?;
                if !is_ident(name) {
                    return Err(at(format!("invalid module name `{name}`")));
                }
                module = name.to_string();
                section = Section::Module;
            }
            Section::Module => {
                if let Some(import) = statement(line, "import ") {
                    imports.push(import.to_string());
                } else if let Some(name) = line
                    .strip_prefix("shader fragment ")
                    .and_then(|l| l.strip_suffix(" is"))
                {
                    if saw_fragment {
                        return Err(at("more than one fragment shader".to_string()));
                    }
                    saw_fragment = true;
                    fragment.name = name.to_string();
                    section = Section::Declarations;
                } else if let Some(name) = line
                    .strip_prefix("shader program ")
                    .and_then(|l| l.strip_suffix(" is"))
                {
                    if !program.name.is_empty() {
                        return Err(at("more than one program".to_string()));
                    }
                    program.name = name.to_string();
                    section = Section::Program;
                } else if line == "end;" {
                    section = Section::Done;
                } else {
                    return Err(at(format!("unexpected `{line}` at module level")));
                }
            }
            Section::Declarations => {
                if line == "with" {
                    section = Section::Values;
                } else if line == "as" {
                    section = Section::Outputs;
                } else if let Some(rest) = statement(line, "in ") {
                    let (name, _, _) = parse_typed_decl(rest).map_err(|e| at(e.to_string()))?;
                    fragment.inputs.push(name);
                } else if let Some(rest) = statement(line, "parameter ") {
                    let (name, _, _) = parse_typed_decl(rest).map_err(|e| at(e.to_string()))?;
                    fragment.parameters.push(name);
                } else if let Some(rest) = statement(line, "out depth ") {
                    let (name, ty, _) = parse_typed_decl(rest).map_err(|e| at(e.to_string()))?;
                    fragment.outputs.push(OutputDecl {
                        name,
                        ty,
                        location: None,
                    });
                } else if let Some(rest) = statement(line, "out ") {
                    let (name, ty, location) =
                        parse_typed_decl(rest).map_err(|e| at(e.to_string()))?;
                    if location.is_none() {
                        return Err(at(format!("output `{name}` has no location")));
                    }
                    fragment.outputs.push(OutputDecl { name, ty, location });
                } else {
                    return Err(at(format!("unexpected `{line}` in declarations")));
                }
            }
            Section::Values => {
                if line == "as" {
                    section = Section::Outputs;
                } else if let Some(rest) = statement(line, "value ") {
                    let (name, rhs) = rest
                        .split_once(" = ")
                        .ok_or_else(|| at(format!("malformed value binding `{line}`")))?;
                    if !is_ident(name) {
                        return Err(at(format!("invalid value name `{name}`")));
                    }
                    fragment.values.push(name.to_string());
                    exprs.push(Expr {
                        line: line_num,
                        binds: Some(name),
                        rhs,
                    });
                } else if let Some(rest) = statement(line, "discard ") {
                    fragment.discards += 1;
                    exprs.push(Expr {
                        line: line_num,
                        binds: None,
                        rhs: rest,
                    });
                } else {
                    return Err(at(format!("unexpected `{line}` in values")));
                }
            }
            Section::Outputs => {
                if line == "end;" {
                    section = Section::Module;
                } else if let Some(rest) = statement(line, "out ") {
                    let (name, rhs) = rest
                        .split_once(" = ")
                        .ok_or_else(|| at(format!("malformed output assignment `{line}`")))?;
                    assigned_outputs.push((line_num, name));
                    exprs.push(Expr {
                        line: line_num,
                        binds: None,
                        rhs,
                    });
                } else {
                    return Err(at(format!("unexpected `{line}` in outputs")));
                }
            }
            Section::Program => {
                if let Some(vertex) = statement(line, "vertex ") {
                    program.vertex = vertex.to_string();
                } else if let Some(frag) = statement(line, "fragment ") {
                    program.fragment = frag.to_string();
                } else if line == "end;" {
                    if program.vertex.is_empty() || program.fragment.is_empty() {
                        return Err(at(format!(
                            "program `{}` needs a vertex and a fragment shader",
                            program.name
                        )));
                    }
                    section = Section::Module;
                } else {
                    return Err(at(format!("unexpected `{line}` in program")));
                }
            }
            Section::Done => {
                return Err(at(format!("unexpected `{line}` after module end")));
            }
        }
    }

    if section != Section::Done {
        bail!("module `{module}` is not closed (stopped in {section:?})");
    }
    if !saw_fragment {
        bail!("module `{module}` has no fragment shader");
    }
    if program.name.is_empty() {
        bail!("module `{module}` has no program");
    }
    if program.fragment != fragment.name {
        bail!(
            "program `{}` binds fragment `{}` but the module defines `{}`",
            program.name,
            program.fragment,
            fragment.name
        );
    }

    check_bindings(&fragment, &exprs, &assigned_outputs)?;

    Ok(ModuleOutline {
        package,
        module,
        imports,
        fragment,
        program,
    })
}

fn check_bindings(
    fragment: &FragmentOutline,
    exprs: &[Expr<'_>],
    assigned_outputs: &[(usize, &str)],
) -> Result<()> {
    let mut declared: HashSet<&str> = HashSet::new();
    for name in fragment
        .inputs
        .iter()
        .chain(&fragment.parameters)
        .chain(fragment.outputs.iter().map(|o| &o.name))
    {
        if !declared.insert(name.as_str()) {
            bail!("`{name}` is declared more than once");
        }
    }

    let all_values: HashSet<&str> = fragment.values.iter().map(String::as_str).collect();
    if all_values.len() != fragment.values.len() {
        let mut seen = HashSet::new();
        let dup = fragment
            .values
            .iter()
            .find(|v| !seen.insert(v.as_str()))
            .map(String::as_str)
            .unwrap_or_default();
        bail!("value `{dup}` is bound more than once");
    }

    let mut bound: HashSet<&str> = HashSet::new();
    for expr in exprs {
        for ident in identifiers(expr.rhs) {
            if DECLARED_PREFIXES.iter().any(|p| ident.starts_with(p)) && !declared.contains(ident)
            {
                bail!("line {}: `{ident}` is not declared", expr.line);
            }
            if all_values.contains(ident) && !bound.contains(ident) {
                bail!("line {}: value `{ident}` is used before it is bound", expr.line);
            }
        }
        if let Some(name) = expr.binds {
            bound.insert(name);
        }
    }

    let mut assigned: HashSet<&str> = HashSet::new();
    for &(line, name) in assigned_outputs {
        if !fragment.outputs.iter().any(|o| o.name == name) {
            bail!("line {line}: output `{name}` is not declared");
        }
        if !assigned.insert(name) {
            bail!("line {line}: output `{name}` is assigned more than once");
        }
    }
    if let Some(missing) = fragment
        .outputs
        .iter()
        .find(|o| !assigned.contains(o.name.as_str()))
    {
        bail!("output `{}` is never assigned", missing.name);
    }

    Ok(())
}
