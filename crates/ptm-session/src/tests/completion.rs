use ptm_core::response::parse_prediction_response;

use super::*;

#[test]
fn test_completions_follow_partial_word() {
    let mut session = make_loaded_session();
    assert!(session
        .receive_predictions(["le chat", "les", "lent"])
        .is_empty());
    let resp = type_text(&mut session, "le");
    assert_eq!(resp.word_completions, strings(&["le chat", "les", "lent"]));
    assert!(type_text(&mut session, "lo").word_completions.is_empty());
}

#[test]
fn test_space_clears_predictions() {
    let mut session = make_loaded_session();
    session.receive_predictions(["le chat", "les"]);
    assert!(session.has_predictions());
    let resp = type_text(&mut session, "le ");
    assert!(!session.has_predictions());
    assert!(resp.word_completions.is_empty());
}

#[test]
fn test_min_word_prefix() {
    let mut session = make_loaded_session();
    session.set_min_word_prefix(3);
    session.receive_predictions(["les", "lent"]);
    assert!(type_text(&mut session, "le").word_completions.is_empty());
    assert_eq!(type_text(&mut session, "les").word_completions, strings(&["les"]));
}

#[test]
fn test_receive_while_mid_word() {
    let mut session = make_loaded_session();
    type_text(&mut session, "le");
    assert_eq!(session.receive_predictions(["les", "le"]), strings(&["les", "le"]));
}

#[test]
fn test_predictions_from_service_payload() {
    let json = r#"{"predictions": [
        {"tgtPhrase": "chat", "srcCoverage": "1-1"},
        {"tgtPhrase": "chaton", "srcCoverage": "1-1"}
    ]}"#;
    let predictions = parse_prediction_response(json).unwrap();
    let mut session = make_loaded_session();
    type_text(&mut session, "le ch");
    let completions = session.receive_predictions(predictions.iter().map(|p| &p.tgt_phrase));
    assert_eq!(completions, strings(&["chat", "chaton"]));

    session.clear_predictions();
    assert!(session.word_completions().is_empty());
}
