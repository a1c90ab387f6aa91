//! Scope for resolving dotted identifiers during §4.2's resolution pass.
//!
//! Two variants cover every binding this system needs: a `Dict` scope is
//! the mutable top-level registry of declared variables (and the `zofar`
//! module binding); an `Object` scope is the `zofar` module itself, a
//! fixed key set whose lookups dispatch to a known macro rather than a
//! stored value.

use flowcheck_symbolic::GuardType;
use std::collections::HashMap;

/// The built-in `zofar` macros (§4.2's table).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MacroKind {
    AsNumber,
    IsMissing,
    BaseUrl,
    IsMobile,
}

impl MacroKind {
    pub fn name(self) -> &'static str {
        match self {
            MacroKind::AsNumber => "asNumber",
            MacroKind::IsMissing => "isMissing",
            MacroKind::BaseUrl => "baseUrl",
            MacroKind::IsMobile => "isMobile",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            MacroKind::AsNumber | MacroKind::IsMissing => 1,
            MacroKind::BaseUrl | MacroKind::IsMobile => 0,
        }
    }
}

/// What a scope lookup yields for one dotted segment.
#[derive(Clone, Debug)]
pub enum ScopeValue {
    /// A plain declared variable, already typed.
    Symbol(String, GuardType),
    /// A built-in macro, not yet called.
    Macro(MacroKind),
    /// A nested scope (currently only the `zofar` module).
    Nested(Scope),
}

/// A lookup scope for dotted identifiers.
#[derive(Clone, Debug)]
pub enum Scope {
    /// Mutable registry of named bindings, keyed by segment.
    Dict(HashMap<String, ScopeValue>),
    /// A fixed key set whose lookups dispatch to a macro handler.
    Object(HashMap<&'static str, ScopeValue>),
}

impl Scope {
    /// The root scope: every declared questionnaire variable plus the
    /// `zofar` built-in module.
    pub fn root(variables: impl IntoIterator<Item = (String, GuardType)>) -> Scope {
        let mut dict = HashMap::new();
        for (name, ty) in variables {
            dict.insert(name.clone(), ScopeValue::Symbol(name, ty));
        }
        dict.insert("zofar".to_string(), ScopeValue::Nested(Scope::zofar_module()));
        Scope::Dict(dict)
    }

    fn zofar_module() -> Scope {
        let mut object = HashMap::new();
        object.insert("asNumber", ScopeValue::Macro(MacroKind::AsNumber));
        object.insert("isMissing", ScopeValue::Macro(MacroKind::IsMissing));
        object.insert("baseUrl", ScopeValue::Macro(MacroKind::BaseUrl));
        object.insert("isMobile", ScopeValue::Macro(MacroKind::IsMobile));
        Scope::Object(object)
    }

    pub fn get(&self, name: &str) -> Option<&ScopeValue> {
        match self {
            Scope::Dict(m) => m.get(name),
            Scope::Object(m) => m.get(name),
        }
    }

    /// Descends through `segments`, resolving each against the previous
    /// segment's nested scope. Returns the final segment's value.
    pub fn resolve<'a>(&'a self, segments: &[String]) -> Option<&'a ScopeValue> {
        let mut current = self;
        let mut value = None;
        for (i, seg) in segments.iter().enumerate() {
            let found = current.get(seg)?;
            if i + 1 == segments.len() {
                value = Some(found);
            } else {
                match found {
                    ScopeValue::Nested(scope) => current = scope,
                    _ => return None,
                }
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_variable() {
        let scope = Scope::root(vec![("p1".to_string(), GuardType::String)]);
        match scope.resolve(&["p1".to_string()]) {
            Some(ScopeValue::Symbol(name, ty)) => {
                assert_eq!(name, "p1");
                assert_eq!(*ty, GuardType::String);
            }
            _ => panic!("expected Symbol"),
        }
    }

    #[test]
    fn resolves_nested_macro() {
        let scope = Scope::root(vec![]);
        match scope.resolve(&["zofar".to_string(), "isMissing".to_string()]) {
            Some(ScopeValue::Macro(MacroKind::IsMissing)) => {}
            _ => panic!("expected isMissing macro"),
        }
    }

    #[test]
    fn unresolved_segment_is_none() {
        let scope = Scope::root(vec![]);
        assert!(scope.resolve(&["ghost".to_string()]).is_none());
    }

    #[test]
    fn descending_into_a_non_nested_value_is_none() {
        let scope = Scope::root(vec![("p1".to_string(), GuardType::String)]);
        assert!(scope.resolve(&["p1".to_string(), "whatever".to_string()]).is_none());
    }
}
