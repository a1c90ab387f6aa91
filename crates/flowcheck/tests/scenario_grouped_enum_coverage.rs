//! Scenario 3 (SPEC_FULL.md §8): a three-valued enum covered via grouped
//! `or` disjunctions rather than one edge per combination.

mod common;

use common::{TempXml, NS};

#[test]
fn three_valued_enum_covered_via_grouped_or_is_sound() {
    let xml = format!(
        r#"<zofar:questionnaire {ns}>
            <zofar:variables>
                <zofar:variable name="p1" type="singleChoiceAnswerOption"/>
                <zofar:variable name="p2" type="singleChoiceAnswerOption"/>
            </zofar:variables>
            <zofar:page uid="1">
                <zofar:body>
                    <zofar:responseDomain variable="p1">
                        <zofar:answerOption uid="p1_y" value="1" label="yes"/>
                        <zofar:answerOption uid="p1_n" value="2" label="no"/>
                    </zofar:responseDomain>
                    <zofar:responseDomain variable="p2">
                        <zofar:answerOption uid="p2_y" value="1" label="yes"/>
                        <zofar:answerOption uid="p2_n" value="2" label="no"/>
                        <zofar:answerOption uid="p2_na" value="3" label="n/a"/>
                    </zofar:responseDomain>
                </zofar:body>
                <zofar:transitions>
                    <zofar:transition target="2" condition="p1 == 'p1_y' and p2 == 'p2_y'"/>
                    <zofar:transition target="2" condition="p1 == 'p1_y' and (p2 == 'p2_n' or p2 == 'p2_na')"/>
                    <zofar:transition target="2" condition="p1 == 'p1_n' and (p2 == 'p2_y' or p2 == 'p2_na')"/>
                    <zofar:transition target="2" condition="p1 == 'p1_n' and p2 == 'p2_n'"/>
                </zofar:transitions>
            </zofar:page>
            <zofar:page uid="2"/>
        </zofar:questionnaire>"#,
        ns = NS
    );
    let fixture = TempXml::new(&xml);
    let report = flowcheck::check(fixture.path());
    assert!(report.ok, "expected ok report, got {:?}", report.errors);

    let graph = report.graph.expect("graph present on success");
    let sink = graph.nodes.iter().find(|n| n.uid == "2").expect("sink node");
    assert_eq!(sink.predicate, "true");
}
