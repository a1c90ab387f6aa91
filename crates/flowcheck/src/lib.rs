//! # flowcheck
//!
//! The orchestrator: loads a `zofar` questionnaire XML document, derives
//! enum domains, compiles every guard expression, builds the page graph,
//! and runs the graph engine's checks, producing a single [`Report`] (§6).
//!
//! # Module Structure
//!
//! - [`enums`] — derives [`flowcheck_symbolic::EnumDomain`]s from declared answer options
//! - [`intervals`] — derives interval-based domains for undeclared numeric variables
//! - [`compile`] — builds scope and the page graph from a loaded questionnaire
//! - [`report`] — [`Report`], the checked output
//! - [`error`] — [`Error`], wrapping every stage's error type

mod compile;
mod enums;
mod error;
mod intervals;
mod report;

pub use error::Error;
pub use report::{EdgeReport, GraphReport, NodeReport, Report, ReportError};

use flowcheck_base::Interner;
use std::path::Path;

/// Runs the full pipeline against a questionnaire XML file at `path`.
///
/// Matches the original checker's top-level `main`: load, derive enum
/// domains, compile every guard, build the graph, then run the graph
/// engine's checks in order (in-degree, propagation, soundness,
/// disjointness, reachability), stopping at the first violation.
pub fn check(path: impl AsRef<Path>) -> Report {
    let mut interner = Interner::new();
    match check_inner(path.as_ref(), &mut interner) {
        Ok((graph, preds)) => Report::success(report::GraphReport::render(&graph, &preds, &interner)),
        Err(err) => Report::failure(vec![err]),
    }
}

fn check_inner(
    path: &Path,
    interner: &mut Interner,
) -> Result<(flowcheck_graph::Graph, std::collections::HashMap<String, flowcheck_symbolic::GuardExpr>), Error> {
    log::info!("loading questionnaire from {}", path.display());
    let questionnaire = flowcheck_loader::load(path)?;

    let enum_domains = enums::derive_enum_domains(&questionnaire.variables, &questionnaire.pages, interner)?;
    log::debug!("derived {} enum domain(s)", enum_domains.len());

    let scope = compile::build_scope(&questionnaire);
    let interval_domains =
        intervals::derive_interval_domains(&questionnaire.pages, &questionnaire.variables, &scope, interner)?;
    log::debug!("derived {} interval domain(s)", interval_domains.len());

    let mut all_domains = enum_domains;
    all_domains.extend(interval_domains.values().map(|d| d.domain.clone()));

    let graph = compile::build_graph(&questionnaire, &scope, &all_domains, &interval_domains, interner)?;
    log::debug!("built graph with {} node(s), source '{}'", graph.nodes.len(), graph.source);

    let (graph, preds) = flowcheck_graph::run(graph, &all_domains, interner)?;
    log::info!("all checks passed");
    Ok((graph, preds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(xml: &str) -> tempfile_free_path::TempXml {
        tempfile_free_path::TempXml::new(xml)
    }

    mod tempfile_free_path {
        use std::fs;
        use std::path::PathBuf;

        /// A throwaway XML file under the OS temp directory, removed on drop.
        /// Avoids pulling in a `tempfile` dependency for a handful of
        /// integration-style tests.
        pub struct TempXml {
            path: PathBuf,
        }

        impl TempXml {
            pub fn new(xml: &str) -> TempXml {
                let mut path = std::env::temp_dir();
                let unique = format!("flowcheck-test-{}-{}.xml", std::process::id(), xml.len());
                path.push(unique);
                fs::write(&path, xml).expect("write fixture");
                TempXml { path }
            }

            pub fn path(&self) -> &std::path::Path {
                &self.path
            }
        }

        impl Drop for TempXml {
            fn drop(&mut self) {
                let _ = fs::remove_file(&self.path);
            }
        }
    }

    const NS: &str = r#"xmlns:zofar="http://www.his.de/zofar/xml/questionnaire""#;

    #[test]
    fn exhaustive_two_valued_split_passes() {
        let xml = format!(
            r#"<zofar:questionnaire {ns}>
                <zofar:variables>
                    <zofar:variable name="p1" type="singleChoiceAnswerOption"/>
                </zofar:variables>
                <zofar:page uid="1">
                    <zofar:body>
                        <zofar:responseDomain variable="p1">
                            <zofar:answerOption uid="p1_y" value="1" label="yes"/>
                            <zofar:answerOption uid="p1_n" value="2" label="no"/>
                        </zofar:responseDomain>
                    </zofar:body>
                    <zofar:transitions>
                        <zofar:transition target="2" condition="p1 == 'p1_y'"/>
                        <zofar:transition target="2" condition="p1 == 'p1_n'"/>
                    </zofar:transitions>
                </zofar:page>
                <zofar:page uid="2"/>
            </zofar:questionnaire>"#,
            ns = NS
        );
        let fixture = write_fixture(&xml);
        let report = check(fixture.path());
        assert!(report.ok, "expected ok report, got {:?}", report.errors);
    }

    #[test]
    fn missing_combination_is_reported_as_soundness_error() {
        let xml = format!(
            r#"<zofar:questionnaire {ns}>
                <zofar:variables>
                    <zofar:variable name="p1" type="singleChoiceAnswerOption"/>
                </zofar:variables>
                <zofar:page uid="1">
                    <zofar:body>
                        <zofar:responseDomain variable="p1">
                            <zofar:answerOption uid="p1_y" value="1" label="yes"/>
                            <zofar:answerOption uid="p1_n" value="2" label="no"/>
                        </zofar:responseDomain>
                    </zofar:body>
                    <zofar:transitions>
                        <zofar:transition target="2" condition="p1 == 'p1_y'"/>
                    </zofar:transitions>
                </zofar:page>
                <zofar:page uid="2"/>
            </zofar:questionnaire>"#,
            ns = NS
        );
        let fixture = write_fixture(&xml);
        let report = check(fixture.path());
        assert!(!report.ok);
        assert_eq!(report.errors[0].kind, "SoundnessError");
    }

    #[test]
    fn undeclared_variable_is_reported() {
        let xml = format!(
            r#"<zofar:questionnaire {ns}>
                <zofar:page uid="1">
                    <zofar:body>
                        <zofar:text variable="ghost"/>
                    </zofar:body>
                </zofar:page>
            </zofar:questionnaire>"#,
            ns = NS
        );
        let fixture = write_fixture(&xml);
        let report = check(fixture.path());
        assert!(!report.ok);
        assert_eq!(report.errors[0].kind, "UndeclaredVariable");
    }
}
