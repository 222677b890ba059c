use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;

const DIRECTIVE_PREFIX: &str = "@include \"";

/// Content of one resolved include, keyed by the directive's line number
/// in the including file.
struct Inclusion {
    name: String,
    text: String,
}

/// Resolve every `@include` directive in the file at `path`, recursively.
///
/// On success returns the fully expanded text, with `#line` markers
/// spliced in so downstream compiler diagnostics still report positions
/// in the original files. On failure returns every problem found, in
/// scan order; no partial output is ever produced.
pub fn resolve_file(path: &Path) -> Result<String, Vec<ResolveError>> {
    resolve(path, &[], true)
}

fn resolve(
    path: &Path,
    ancestors: &[PathBuf],
    is_root: bool,
) -> Result<String, Vec<ResolveError>> {
    // Cycle detection compares canonical paths, so the same file reached
    // through differently spelled relative paths still counts as a cycle.
    let abs = match fs::canonicalize(path) {
        Ok(abs) => abs,
        Err(source) => {
            return Err(vec![ResolveError::Io {
                path: path.to_path_buf(),
                source,
            }])
        }
    };
    if ancestors.contains(&abs) {
        return Err(vec![ResolveError::CircularInclude { path: abs }]);
    }

    log::debug!("Resolving {:?}", abs);

    let content = match fs::read_to_string(&abs) {
        Ok(content) => content,
        Err(source) => return Err(vec![ResolveError::Io { path: abs, source }]),
    };

    let dir = abs.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut errors = Vec::new();
    let mut inclusions = HashMap::<usize, Inclusion>::new();

    // First pass: find directives and expand them, collecting every error
    // in the file rather than stopping at the first one.
    for (idx, line) in content.lines().enumerate() {
        let linenum = idx + 1;
        let Some(rest) = line.strip_prefix(DIRECTIVE_PREFIX)
            else { continue };

        let Some(name) = rest.strip_suffix('"') else {
            errors.push(ResolveError::MalformedDirective {
                path: abs.clone(),
                line: linenum,
            });
            continue;
        };

        let target = dir.join(name);
        if !target.exists() {
            errors.push(ResolveError::IncludeNotFound {
                path: abs.clone(),
                line: linenum,
                name: name.to_string(),
            });
            continue;
        }

        log::trace!("{:?}:{} includes {:?}", abs, linenum, target);

        let mut chain = ancestors.to_vec();
        chain.push(abs.clone());
        match resolve(&target, &chain, false) {
            Ok(text) => {
                inclusions.insert(
                    linenum,
                    Inclusion {
                        name: name.to_string(),
                        text,
                    },
                );
            }
            Err(nested) => errors.extend(nested),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut out = String::new();

    // Included files restart the compiler's line counter at 1.
    if !is_root {
        out += "#line 1\n";
    }

    // Second pass: splice each expansion at its directive's position and
    // re-synchronize line numbers for the lines that follow it.
    for (idx, line) in content.lines().enumerate() {
        let linenum = idx + 1;
        if let Some(inclusion) = inclusions.get(&linenum) {
            out += &format!("// @include \"{}\"\n", inclusion.name);
            out += &inclusion.text;
            out += &format!("#line {}\n", linenum + 1);
        } else {
            out += line;
            out += "\n";
        }
    }

    Ok(out)
}
