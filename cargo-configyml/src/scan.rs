//! Discovery of `#[derive(ConfigYml)]` candidates in Rust sources.
//!
//! Sources are read through `cap-std` and parsed with `syn`. Every struct,
//! enum or union deriving `ConfigYml` becomes a candidate, so items the
//! generator cannot handle are still reported instead of silently ignored.
//! Constructor evidence the derive cannot see, such as a hand-written
//! `impl Default`, is collected from the same file and module.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use config_yml_codegen::{Candidate, Constructor, derives};
use syn::{DeriveInput, ImplItem, Item, Type};

use crate::error::CliError;

/// Derive name marking a candidate.
const DERIVE_NAME: &str = "ConfigYml";

/// A Rust source file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as given on the command line or discovered while walking.
    pub path: Utf8PathBuf,
    /// File contents.
    pub contents: String,
}

/// Reads every source named by `inputs`.
///
/// A directory is walked recursively in name order and contributes its
/// `.rs` files. A file is read whatever its extension.
///
/// # Errors
///
/// Returns [`CliError::Io`] when a path cannot be opened or read.
pub fn read_sources(inputs: &[Utf8PathBuf]) -> Result<Vec<SourceFile>, CliError> {
    let mut sources = Vec::new();
    for input in inputs {
        read_input(input, &mut sources)?;
    }
    Ok(sources)
}

fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn read_input(input: &Utf8Path, sources: &mut Vec<SourceFile>) -> Result<(), CliError> {
    let Some(name) = input.file_name() else {
        let dir = Dir::open_ambient_dir(input, ambient_authority())
            .map_err(|err| CliError::io(input, err))?;
        return walk(&dir, input, sources);
    };
    let parent = parent_or_dot(input);
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| CliError::io(parent, err))?;
    let metadata = dir.metadata(name).map_err(|err| CliError::io(input, err))?;
    if metadata.is_dir() {
        let subdir = dir.open_dir(name).map_err(|err| CliError::io(input, err))?;
        return walk(&subdir, input, sources);
    }
    let contents = dir
        .read_to_string(name)
        .map_err(|err| CliError::io(input, err))?;
    sources.push(SourceFile {
        path: input.to_path_buf(),
        contents,
    });
    Ok(())
}

fn walk(dir: &Dir, base: &Utf8Path, sources: &mut Vec<SourceFile>) -> Result<(), CliError> {
    let mut entries = Vec::new();
    for entry_result in dir.entries().map_err(|err| CliError::io(base, err))? {
        let entry = entry_result.map_err(|err| CliError::io(base, err))?;
        let entry_name = entry.file_name().map_err(|err| CliError::io(base, err))?;
        let file_type = entry.file_type().map_err(|err| CliError::io(base, err))?;
        entries.push((Utf8PathBuf::from(entry_name), file_type));
    }
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (name, file_type) in entries {
        let rel = base.join(&name);
        if file_type.is_dir() {
            let subdir = dir.open_dir(&name).map_err(|err| CliError::io(&rel, err))?;
            walk(&subdir, &rel, sources)?;
        } else if file_type.is_file() && name.extension() == Some("rs") {
            let contents = dir
                .read_to_string(&name)
                .map_err(|err| CliError::io(&rel, err))?;
            sources.push(SourceFile {
                path: rel,
                contents,
            });
        }
    }
    Ok(())
}

/// Parses `source` and returns its candidates in declaration order.
///
/// # Errors
///
/// Returns [`CliError::Parse`] when the file is not valid Rust.
pub fn scan_source(source: &SourceFile) -> Result<Vec<Candidate>, CliError> {
    let file = syn::parse_file(&source.contents).map_err(|err| CliError::Parse {
        path: source.path.clone(),
        source: err,
    })?;
    let mut constructors = HashMap::new();
    collect_constructors(&file.items, &mut Vec::new(), &mut constructors);
    let mut candidates = Vec::new();
    collect_candidates(&file.items, &mut Vec::new(), &constructors, &mut candidates);
    tracing::debug!(path = %source.path, candidates = candidates.len(), "scanned source");
    Ok(candidates)
}

fn collect_candidates(
    items: &[Item],
    module_path: &mut Vec<String>,
    constructors: &HashMap<String, Constructor>,
    candidates: &mut Vec<Candidate>,
) {
    for item in items {
        let input: DeriveInput = match item {
            Item::Struct(item_struct) if derives(&item_struct.attrs, DERIVE_NAME) => {
                item_struct.clone().into()
            }
            Item::Enum(item_enum) if derives(&item_enum.attrs, DERIVE_NAME) => {
                item_enum.clone().into()
            }
            Item::Union(item_union) if derives(&item_union.attrs, DERIVE_NAME) => {
                item_union.clone().into()
            }
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    module_path.push(module.ident.to_string());
                    collect_candidates(nested, module_path, constructors, candidates);
                    module_path.pop();
                }
                continue;
            }
            _ => continue,
        };
        let mut candidate = Candidate::new(input).with_module_path(module_path.clone());
        if let Some(constructor) = constructors.get(&candidate.qualified_name()) {
            candidate = candidate.with_constructor(constructor.clone());
        }
        candidates.push(candidate);
    }
}

/// Records `impl Default for T` and inherent zero-argument `fn new()` by
/// the qualified name of `T` within the file. Only impls in the module that
/// declares `T` are matched. A `Default` impl wins over `new`.
fn collect_constructors(
    items: &[Item],
    module_path: &mut Vec<String>,
    constructors: &mut HashMap<String, Constructor>,
) {
    for item in items {
        match item {
            Item::Impl(item_impl) => {
                let Some(type_name) = self_type_name(&item_impl.self_ty) else {
                    continue;
                };
                let mut segments = module_path.clone();
                segments.push(type_name);
                let qualified = segments.join("::");
                match &item_impl.trait_ {
                    Some((_, trait_path, _)) => {
                        if trait_path
                            .segments
                            .last()
                            .is_some_and(|segment| segment.ident == "Default")
                        {
                            constructors.insert(qualified, Constructor::Default);
                        }
                    }
                    None => {
                        if let Some(function) = zero_argument_new(&item_impl.items) {
                            constructors
                                .entry(qualified)
                                .or_insert(Constructor::Named(function));
                        }
                    }
                }
            }
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    module_path.push(module.ident.to_string());
                    collect_constructors(nested, module_path, constructors);
                    module_path.pop();
                }
            }
            _ => {}
        }
    }
}

fn self_type_name(ty: &Type) -> Option<String> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    type_path
        .path
        .segments
        .last()
        .filter(|segment| segment.arguments.is_none())
        .map(|segment| segment.ident.to_string())
}

fn zero_argument_new(items: &[ImplItem]) -> Option<syn::Ident> {
    items.iter().find_map(|item| match item {
        ImplItem::Fn(function)
            if function.sig.ident == "new"
                && function.sig.inputs.is_empty()
                && function.sig.generics.params.is_empty() =>
        {
            Some(function.sig.ident.clone())
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};
    use rstest::rstest;

    fn source(contents: &str) -> SourceFile {
        SourceFile {
            path: Utf8PathBuf::from("settings.rs"),
            contents: contents.to_owned(),
        }
    }

    #[rstest]
    fn finds_annotated_items_in_nested_modules() -> Result<()> {
        let candidates = scan_source(&source(
            r"
            #[derive(ConfigYml, Default)]
            pub struct Root { pub port: u16 }

            pub struct Ignored { pub port: u16 }

            pub mod net {
                #[derive(config_yml::ConfigYml)]
                pub enum Mode { Fast }
            }
            ",
        ))?;
        let names: Vec<_> = candidates.iter().map(Candidate::qualified_name).collect();
        assert_eq!(names, ["Root", "net::Mode"]);
        Ok(())
    }

    #[rstest]
    #[case::default_impl(
        "impl Default for Server { fn default() -> Self { Self { port: 1 } } }",
        Constructor::Default
    )]
    #[case::new_fn(
        "impl Server { pub fn new() -> Self { Self { port: 1 } } }",
        Constructor::Named(syn::parse_quote!(new))
    )]
    fn discovers_constructors(#[case] evidence: &str, #[case] expected: Constructor) -> Result<()> {
        let contents = format!("#[derive(ConfigYml)] pub struct Server {{ pub port: u16 }}\n{evidence}");
        let candidates = scan_source(&source(&contents))?;
        let candidate = candidates.first().context("candidate")?;
        let artifact = config_yml_codegen::generate(candidate)?;
        let expected_call = match expected {
            Constructor::Default => "< Server as :: core :: default :: Default > :: default ()",
            Constructor::Named(_) => "Server :: new ()",
        };
        assert!(artifact.tokens.to_string().contains(expected_call));
        Ok(())
    }

    #[rstest]
    fn new_with_arguments_is_not_a_constructor() -> Result<()> {
        let candidates = scan_source(&source(
            "#[derive(ConfigYml)] pub struct Server { pub port: u16 }
             impl Server { pub fn new(port: u16) -> Self { Self { port } } }",
        ))?;
        let candidate = candidates.first().context("candidate")?;
        assert!(config_yml_codegen::generate(candidate).is_err());
        Ok(())
    }

    #[rstest]
    fn constructor_evidence_stays_in_its_module() -> Result<()> {
        let candidates = scan_source(&source(
            r"
            pub mod a {
                #[derive(ConfigYml)]
                pub struct Server { pub port: u16 }
            }
            pub mod b {
                #[derive(ConfigYml)]
                pub struct Server { pub port: u16 }
                impl Default for Server { fn default() -> Self { Self { port: 1 } } }
            }
            ",
        ))?;
        let unrelated = candidates.first().context("a::Server")?;
        assert_eq!(unrelated.qualified_name(), "a::Server");
        assert!(matches!(
            config_yml_codegen::generate(unrelated),
            Err(config_yml_codegen::GenerateError::MissingDefaultConstructor { .. })
        ));
        let owner = candidates.get(1).context("b::Server")?;
        assert!(config_yml_codegen::generate(owner).is_ok());
        Ok(())
    }

    #[rstest]
    fn invalid_source_reports_path() {
        let result = scan_source(&source("pub struct {"));
        assert!(matches!(
            result,
            Err(CliError::Parse { ref path, .. }) if path == "settings.rs"
        ));
    }
}
