//! The questionnaire data model produced by the loader (§3).

use std::collections::HashMap;

/// The declared type of a [`Variable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarType {
    String,
    Number,
    Boolean,
    /// Aliased from the XML's `singleChoiceAnswerOption` type.
    Enum,
}

/// A variable declared in `<variables>` or synthesized from a preload item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub typ: VarType,
    pub is_preload: bool,
}

/// One admissible value of a response domain: `<answerOption uid value label>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOption {
    pub uid: String,
    pub value: i64,
    pub label: String,
}

/// A `<responseDomain variable="…">` declaration on a page, giving the
/// variable's enum membership for that page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValues {
    pub variable: String,
    pub values: Vec<AnswerOption>,
}

/// A `<transition target="…" condition="…"?/>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub target_uid: String,
    /// `None` means the XML omitted `condition`, which defaults to `"true"`.
    pub condition: Option<String>,
}

/// A variable reference found inside a page's `<body>`, with the
/// conjunction of `visible` guards accumulated from its ancestor elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarRef {
    pub variable: String,
    pub visible_guards: Vec<String>,
}

/// One `<page uid="…">`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub uid: String,
    pub transitions: Vec<Transition>,
    pub var_refs: Vec<VarRef>,
    pub enum_values: Vec<EnumValues>,
}

/// The fully loaded questionnaire: declared variables and pages in
/// document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Questionnaire {
    pub variables: HashMap<String, Variable>,
    pub pages: Vec<Page>,
}
