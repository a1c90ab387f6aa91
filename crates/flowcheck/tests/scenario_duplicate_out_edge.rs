//! Scenario 5 (SPEC_FULL.md §8): two outbound edges from the same node
//! carrying an identical guard are a disjointness violation, not merely a
//! soundness gap.

mod common;

use common::{TempXml, NS};

#[test]
fn duplicate_out_edges_are_rejected_as_disjointness_violation() {
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
                    <zofar:transition target="2" condition="p1 == 'p1_n'"/>
                    <zofar:transition target="3" condition="p1 == 'p1_n'"/>
                    <zofar:transition target="4" condition="p1 == 'p1_y'"/>
                </zofar:transitions>
            </zofar:page>
            <zofar:page uid="2"/>
            <zofar:page uid="3"/>
            <zofar:page uid="4"/>
        </zofar:questionnaire>"#,
        ns = NS
    );
    let fixture = TempXml::new(&xml);
    let report = flowcheck::check(fixture.path());
    assert!(!report.ok);
    assert_eq!(report.errors[0].kind, "DisjointnessError");
}
