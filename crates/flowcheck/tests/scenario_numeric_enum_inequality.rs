//! Scenario 4 (SPEC_FULL.md §8): an inequality over an enum's `_NUM` domain
//! lowers to a disjunction covering the complementary halves of `{1..7}`.

mod common;

use common::{TempXml, NS};

#[test]
fn inequality_split_over_numeric_enum_is_sound() {
    let options: String = (1..=7)
        .map(|v| format!(r#"<zofar:answerOption uid="p1_{v}" value="{v}" label="{v}"/>"#))
        .collect();
    let xml = format!(
        r#"<zofar:questionnaire {ns}>
            <zofar:variables>
                <zofar:variable name="p1" type="singleChoiceAnswerOption"/>
            </zofar:variables>
            <zofar:page uid="1">
                <zofar:body>
                    <zofar:responseDomain variable="p1">
                        {options}
                    </zofar:responseDomain>
                </zofar:body>
                <zofar:transitions>
                    <zofar:transition target="2" condition="zofar.asNumber(p1) lt 3"/>
                    <zofar:transition target="2" condition="zofar.asNumber(p1) gt 2"/>
                </zofar:transitions>
            </zofar:page>
            <zofar:page uid="2"/>
        </zofar:questionnaire>"#,
        ns = NS,
        options = options,
    );
    let fixture = TempXml::new(&xml);
    let report = flowcheck::check(fixture.path());
    assert!(report.ok, "expected ok report, got {:?}", report.errors);
}
