//! Derives [`EnumDomain`]s from the loader's declared answer options (§4.5).
//!
//! Every enum variable gets two domains: a string-typed one keyed by answer
//! option uid (named after the variable itself, matching how guards compare
//! it against quoted uids), and a number-typed one keyed by answer option
//! value, named `{var}_NUM` (matching `zofar.asNumber`'s naming in the
//! resolver).

use crate::error::Error;
use flowcheck_base::Interner;
use flowcheck_loader::{EnumValues, Page, VarType, Variable};
use flowcheck_symbolic::{EnumDomain, GuardType, MemberKey};
use std::collections::HashMap;

/// Finds the first page-declared `EnumValues` for every `Enum`-typed
/// variable. Declarations that disagree across pages are already rejected
/// by the loader, so the first occurrence is representative.
fn first_declaration<'a>(variable: &str, pages: &'a [Page]) -> Option<&'a EnumValues> {
    pages.iter().flat_map(|p| &p.enum_values).find(|ev| ev.variable == variable)
}

/// Builds the string- and number-typed domain pair for every declared enum
/// variable.
pub fn derive_enum_domains(
    variables: &HashMap<String, Variable>,
    pages: &[Page],
    interner: &mut Interner,
) -> Result<Vec<EnumDomain>, Error> {
    let mut domains = Vec::new();
    let mut enum_vars: Vec<&Variable> = variables.values().filter(|v| v.typ == VarType::Enum).collect();
    enum_vars.sort_by(|a, b| a.name.cmp(&b.name));

    for var in enum_vars {
        let declared = first_declaration(&var.name, pages);
        let Some(declared) = declared else {
            continue;
        };

        let string_keys: Vec<MemberKey> = declared.values.iter().map(|o| MemberKey::Str(o.uid.clone())).collect();
        domains.push(EnumDomain::new(interner, &var.name, GuardType::String, string_keys)?);

        let number_keys: Vec<MemberKey> = declared.values.iter().map(|o| MemberKey::Int(o.value)).collect();
        let number_name = format!("{}_NUM", var.name);
        domains.push(EnumDomain::new(interner, &number_name, GuardType::Number, number_keys)?);
    }

    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcheck_loader::AnswerOption;

    #[test]
    fn derives_string_and_number_domains_for_each_enum_variable() {
        let mut variables = HashMap::new();
        variables.insert("p1".to_string(), Variable { name: "p1".to_string(), typ: VarType::Enum, is_preload: false });
        let pages = vec![Page {
            uid: "1".to_string(),
            transitions: vec![],
            var_refs: vec![],
            enum_values: vec![EnumValues {
                variable: "p1".to_string(),
                values: vec![
                    AnswerOption { uid: "p1_y".to_string(), value: 1, label: "yes".to_string() },
                    AnswerOption { uid: "p1_n".to_string(), value: 2, label: "no".to_string() },
                ],
            }],
        }];
        let mut interner = Interner::new();
        let domains = derive_enum_domains(&variables, &pages, &mut interner).unwrap();
        assert_eq!(domains.len(), 2);
        assert_eq!(interner.resolve(domains[0].variable), "p1");
        assert_eq!(interner.resolve(domains[1].variable), "p1_NUM");
    }

    #[test]
    fn non_enum_variables_contribute_no_domains() {
        let mut variables = HashMap::new();
        variables.insert("p1".to_string(), Variable { name: "p1".to_string(), typ: VarType::String, is_preload: false });
        let mut interner = Interner::new();
        let domains = derive_enum_domains(&variables, &[], &mut interner).unwrap();
        assert!(domains.is_empty());
    }
}
