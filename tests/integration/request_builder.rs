//! Property tests for request building
//!
//! For any non-empty topic and subject the request must carry the full lesson plan
//! schema, and building it twice must produce identical requests.

use lectern::request::DEFAULT_GRADE_LEVEL;
use lectern::{build_request, LessonParams, SchemaNode};
use proptest::prelude::*;
use proptest::test_runner::TestRunner;

fn required_names(node: &SchemaNode) -> Vec<&str> {
    node.required().iter().map(String::as_str).collect()
}

fn assert_lesson_schema(schema: &SchemaNode) {
    assert_eq!(schema.kind(), "OBJECT");
    assert_eq!(
        required_names(schema),
        vec!["title", "learning_objectives", "slides", "quiz", "homework"]
    );

    let slide = schema
        .property("slides")
        .and_then(SchemaNode::items)
        .expect("slides items");
    assert_eq!(required_names(slide), vec!["title", "content"]);

    let quiz_item = schema
        .property("quiz")
        .and_then(SchemaNode::items)
        .expect("quiz items");
    assert_eq!(required_names(quiz_item), vec!["question", "options", "answer"]);
    assert_eq!(
        quiz_item.property("options").and_then(SchemaNode::items),
        Some(&SchemaNode::String)
    );

    let homework = schema.property("homework").expect("homework");
    assert_eq!(required_names(homework), vec!["title", "description"]);
}

fn non_blank() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ,.'-]{0,40}"
}

#[test]
fn test_request_always_carries_complete_schema() {
    let mut runner = TestRunner::default();
    let strategy = (non_blank(), "[A-Za-z0-9 ]{0,20}", non_blank());

    runner
        .run(&strategy, |(topic, grade, subject)| {
            let params = LessonParams::new(topic.clone(), grade.clone(), subject.clone());
            prop_assert!(params.validate().is_ok());

            let request = build_request(&params);
            assert_lesson_schema(&request.output_schema);
            prop_assert!(request.output_schema.validate().is_ok());

            prop_assert!(request.instruction_text.contains(topic.trim()));
            prop_assert!(request.instruction_text.contains(subject.trim()));
            if grade.trim().is_empty() {
                prop_assert!(request.instruction_text.contains(DEFAULT_GRADE_LEVEL));
            } else {
                prop_assert!(request.instruction_text.contains(grade.trim()));
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_request_building_is_deterministic() {
    let mut runner = TestRunner::default();
    let strategy = (non_blank(), "[A-Za-z0-9 ]{0,20}", non_blank());

    runner
        .run(&strategy, |(topic, grade, subject)| {
            let params = LessonParams::new(topic, grade, subject);
            let first = build_request(&params);
            let second = build_request(&params);
            prop_assert_eq!(&first, &second);

            let first_body = serde_json::to_string(&first.to_body()).unwrap();
            let second_body = serde_json::to_string(&second.to_body()).unwrap();
            prop_assert_eq!(first_body, second_body);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_wire_body_shape() {
    let request = build_request(&LessonParams::new("Photosynthesis", "", "Biology"));
    let body = serde_json::to_value(request.to_body()).unwrap();

    assert_eq!(
        body["contents"][0]["parts"][0]["text"].as_str(),
        Some(request.instruction_text.as_str())
    );
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    let schema = &body["generationConfig"]["responseSchema"];
    assert_eq!(schema["type"], "OBJECT");
    assert_eq!(schema["properties"]["quiz"]["type"], "ARRAY");
    assert_eq!(schema["properties"]["quiz"]["items"]["type"], "OBJECT");
    assert_eq!(
        schema["properties"]["homework"]["required"],
        serde_json::json!(["title", "description"])
    );
    assert!(request
        .instruction_text
        .contains(&format!("{} Biology", DEFAULT_GRADE_LEVEL)));
}
