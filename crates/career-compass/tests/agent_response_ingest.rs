use career_compass::adapter::{Extraction, ExtractionSource, NoDataReason, ResponseAdapter};
use career_compass::decision::{
    read_table, table_to_csv, AgentResponse, CareerDecisionModel, Criteria, UpdateMode,
};

const SCENARIO_A: &str = r#"{"careers": {"Data Scientist": {"salary_potential": 8, "job_security": 7, "growth_opportunity": 8, "work_life_balance": 5, "skill_transferability": 6, "market_demand": 8, "education_barrier": 5, "remote_flexibility": 6}, "MBA": {"salary_potential": 6, "job_security": 5, "growth_opportunity": 9, "work_life_balance": 3, "skill_transferability": 9, "market_demand": 6, "education_barrier": 3, "remote_flexibility": 4}}}"#;

fn tagged(payload: &str) -> String {
    format!("Here is how they compare.\n\nCAREER_MATRIX:\n```json\n{payload}\n```\n")
}

#[test]
fn structured_payload_selects_data_scientist() {
    let agent = AgentResponse {
        response: tagged(SCENARIO_A),
        ..AgentResponse::default()
    };
    let model = CareerDecisionModel::from_agent_response(&agent, &ResponseAdapter::new());

    let scores = model.strategy_scores();
    assert_eq!(scores.worst_case, vec![Some(5.0), Some(3.0)]);
    assert_eq!(scores.selection.name(), Some("Data Scientist"));
    assert!(model.explain().contains("Recommended: Data Scientist"));
}

#[test]
fn structured_payload_round_trips_through_the_matrix() {
    let payload = r#"{"careers": {"Nurse": {"salary_potential": 6, "job_security": 9, "market_demand": 8}, "Pilot": {"salary_potential": 9.5, "remote_flexibility": 1}}}"#;
    let extraction = ResponseAdapter::new().extract(&tagged(payload));
    let table = extraction.into_table().expect("structured table");

    let matrix = table.as_matrix();
    assert_eq!(matrix.names, vec!["Nurse", "Pilot"]);
    assert_eq!(
        matrix.rows[0],
        &[6.0, 9.0, 5.0, 5.0, 5.0, 8.0, 5.0, 5.0][..]
    );
    assert_eq!(
        matrix.rows[1],
        &[9.5, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 1.0][..]
    );
}

#[test]
fn free_text_with_two_roles_builds_a_default_table() {
    let extraction =
        ResponseAdapter::new().extract("I'm comparing software engineer and designer roles");
    assert_eq!(extraction.source(), Some(ExtractionSource::KeywordScan));

    let table = extraction.into_table().expect("two roles found");
    assert_eq!(table.names(), vec!["Software Engineer", "Designer"]);
    assert_eq!(table.criteria(), &Criteria::canonical());
    for option in table.options() {
        assert_eq!(option.scores.len(), 8);
    }
}

#[test]
fn free_text_with_one_role_has_no_usable_data() {
    let extraction = ResponseAdapter::new().extract("Have you thought about being a consultant?");
    assert!(matches!(
        extraction,
        Extraction::NoUsableData(NoDataReason::InsufficientSignal { .. })
    ));
    assert!(extraction.table().is_none());
}

#[test]
fn extracted_table_replaces_then_exports_as_csv() {
    let mut model = CareerDecisionModel::standard();
    let table = ResponseAdapter::new()
        .extract(&tagged(SCENARIO_A))
        .into_table()
        .expect("structured table");

    let summary = model.apply(table, UpdateMode::Replace).expect("replace");
    assert_eq!(summary.total, 2);

    let csv = table_to_csv(model.table()).expect("csv export");
    assert!(csv.starts_with("Career,Salary Potential,Job Security,Growth Opportunity"));
    let reloaded = read_table(csv.as_bytes()).expect("csv import");
    assert_eq!(&reloaded, model.table());
}
