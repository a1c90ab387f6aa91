//! Builds a [`Questionnaire`] from a parsed `zofar` XML tree (§6).

use crate::error::{LoadError, LoadResult};
use crate::model::{AnswerOption, EnumValues, Page, Questionnaire, Transition, VarRef, VarType, Variable};
use crate::tree::{parse_tree, Element};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Reads and validates a `zofar` questionnaire XML document from disk.
pub fn load(path: &Path) -> LoadResult<Questionnaire> {
    log::debug!("loading questionnaire from {}", path.display());
    let xml = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    questionnaire_from_xml(&xml)
}

/// Builds a [`Questionnaire`] from an in-memory XML document. Exposed
/// separately from [`load`] so tests and the orchestrator can work from
/// inline fixtures without touching the filesystem.
pub fn questionnaire_from_xml(xml: &str) -> LoadResult<Questionnaire> {
    let root = parse_tree(xml)?;
    let variables = variable_declarations(&root);

    let mut page_els = Vec::new();
    root.descendants_named("page", &mut page_els);

    let mut pages = Vec::with_capacity(page_els.len());
    for page_el in page_els {
        let uid = page_el.attr("uid").unwrap_or_default().to_string();
        let enum_values = enum_values_for_page(page_el);
        let var_refs = var_refs_for_page(page_el, &variables, &uid)?;
        let transitions = transitions_for_page(page_el);
        log::trace!(
            "page '{}': {} transitions, {} var refs, {} response domains",
            uid,
            transitions.len(),
            var_refs.len(),
            enum_values.len()
        );
        pages.push(Page { uid, transitions, var_refs, enum_values });
    }

    check_enum_conflicts(&pages)?;
    Ok(Questionnaire { variables, pages })
}

fn parse_var_type(raw: &str) -> Option<VarType> {
    match raw {
        "string" => Some(VarType::String),
        "number" => Some(VarType::Number),
        "boolean" => Some(VarType::Boolean),
        "singleChoiceAnswerOption" => Some(VarType::Enum),
        _ => None,
    }
}

/// `<preloads>/<preload>/<preloadItem variable="NAME"/>` and
/// `<variables>/<variable name="…" type="…"/>`.
fn variable_declarations(root: &Element) -> HashMap<String, Variable> {
    let mut variables = HashMap::new();

    if let Some(preloads) = root.child_named("preloads") {
        let mut items = Vec::new();
        preloads.descendants_named("preloadItem", &mut items);
        for item in items {
            if let Some(name) = item.attr("variable") {
                let preload_name = format!("PRELOAD{}", name);
                variables.insert(
                    preload_name.clone(),
                    Variable { name: preload_name, typ: VarType::String, is_preload: true },
                );
            }
        }
    }

    if let Some(vars_el) = root.child_named("variables") {
        for child in &vars_el.children {
            if child.name != "variable" {
                continue;
            }
            let (Some(name), Some(typ_raw)) = (child.attr("name"), child.attr("type")) else {
                continue;
            };
            let Some(typ) = parse_var_type(typ_raw) else {
                log::warn!("variable '{}' has unrecognized type '{}', skipping", name, typ_raw);
                continue;
            };
            variables.insert(
                name.to_string(),
                Variable { name: name.to_string(), typ, is_preload: false },
            );
        }
    }

    variables
}

/// `<responseDomain variable="…"><answerOption uid value label/></responseDomain>`.
fn enum_values_for_page(page: &Element) -> Vec<EnumValues> {
    let mut domains = Vec::new();
    page.descendants_named("responseDomain", &mut domains);

    domains
        .into_iter()
        .filter_map(|domain| {
            let variable = domain.attr("variable")?.to_string();
            let values = domain
                .children
                .iter()
                .filter(|c| c.name == "answerOption")
                .filter_map(|opt| {
                    let uid = opt.attr("uid")?.to_string();
                    let value: i64 = opt.attr("value")?.parse().ok()?;
                    let label = opt.attr("label").unwrap_or_default().to_string();
                    Some(AnswerOption { uid, value, label })
                })
                .collect();
            Some(EnumValues { variable, values })
        })
        .collect()
}

/// `<body>` descendants carrying a `variable` attribute are references;
/// descendants carrying a `visible` attribute contribute an accumulating
/// guard to every descendant beneath them, matching the original loader's
/// recursive `_var_refs`.
fn var_refs_for_page(page: &Element, variables: &HashMap<String, Variable>, page_uid: &str) -> LoadResult<Vec<VarRef>> {
    let mut out = Vec::new();
    if let Some(body) = page.child_named("body") {
        collect_var_refs(body, &[], variables, page_uid, &mut out)?;
    }
    Ok(out)
}

fn collect_var_refs(
    el: &Element,
    guards: &[String],
    variables: &HashMap<String, Variable>,
    page_uid: &str,
    out: &mut Vec<VarRef>,
) -> LoadResult<()> {
    let mut guards = guards.to_vec();
    if let Some(cond) = el.attr("visible") {
        guards.push(cond.to_string());
    }
    if let Some(var) = el.attr("variable") {
        if !variables.contains_key(var) {
            return Err(LoadError::UndeclaredVariable {
                page_uid: page_uid.to_string(),
                variable: var.to_string(),
            });
        }
        out.push(VarRef { variable: var.to_string(), visible_guards: guards.clone() });
    }
    for child in &el.children {
        collect_var_refs(child, &guards, variables, page_uid, out)?;
    }
    Ok(())
}

/// `<transitions>/<transition target="…" condition="…"?/>`.
fn transitions_for_page(page: &Element) -> Vec<Transition> {
    let Some(transitions_el) = page.child_named("transitions") else {
        return Vec::new();
    };
    transitions_el
        .children
        .iter()
        .filter(|c| c.name == "transition")
        .filter_map(|t| {
            let target_uid = t.attr("target")?.to_string();
            let condition = t.attr("condition").map(str::to_string);
            Some(Transition { target_uid, condition })
        })
        .collect()
}

fn check_enum_conflicts(pages: &[Page]) -> LoadResult<()> {
    let mut seen: HashMap<&str, (&str, HashMap<&str, i64>)> = HashMap::new();
    for page in pages {
        for domain in &page.enum_values {
            let map: HashMap<&str, i64> = domain.values.iter().map(|v| (v.uid.as_str(), v.value)).collect();
            match seen.get(domain.variable.as_str()) {
                None => {
                    seen.insert(domain.variable.as_str(), (page.uid.as_str(), map));
                }
                Some((first_page, first_map)) => {
                    if first_map != &map {
                        return Err(LoadError::EnumConflict {
                            variable: domain.variable.clone(),
                            first_page: first_page.to_string(),
                            second_page: page.uid.clone(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
