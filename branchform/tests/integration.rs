//! Integration tests for branchform

use anyhow::Result;
use branchform::numbering::{compute_labels, label, label_form, strip_labels};
use branchform::persist::{form_from_payload, form_to_payload, from_payload, to_payload};
use branchform::resolver::descendants;
use branchform::{
    CompatError, EditorConfig, MutationError, Question, QuestionEditor, QuestionKind, QuestionRef,
    RemovalMode, RespondentError, ResponseValue, Responses, ScoreOutcome, ScriptedRespondent,
    compare, score, validate, validate_form, visible_questions,
};
use example_forms::{
    DEEP_CHAIN_LEN, branching_quiz, capital_quiz, deep_chain, onboarding_form, pet_survey,
};

fn assert_positions(questions: &[Question]) {
    for (index, question) in questions.iter().enumerate() {
        assert_eq!(question.position(), index, "position of {}", question.title());
    }
}

fn fixtures() -> Vec<Vec<Question>> {
    vec![
        pet_survey(),
        branching_quiz(),
        deep_chain(),
        capital_quiz(),
        onboarding_form().pages[0].questions.clone(),
    ]
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_fixtures_are_valid() {
    for questions in fixtures() {
        let report = validate(&questions);
        assert!(report.is_valid(), "{:?}", report.error_messages());
        assert!(report.warnings.is_empty());
    }
    assert!(validate_form(&onboarding_form()).iter().all(|r| r.is_valid()));
}

#[test]
fn test_saved_multi_select_branch_is_valid() {
    let report = validate(&pet_survey());
    assert!(report.is_valid());
    assert!(report.errors.is_empty());
}

#[test]
fn test_free_text_branch_is_rejected() {
    let mut questions = pet_survey();
    *questions[0].kind_mut() = QuestionKind::ShortAnswer;

    let report = validate(&questions);
    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 1);
    assert!(report.error_messages()[0].contains("only allowed for"));
}

#[test]
fn test_unknown_option_key_is_rejected() {
    let mut questions = pet_survey();
    questions[0].conditional_branches_mut()[0].option_index = 5;
    questions[1].set_parent_link(Some(branchform::ParentLink::new(
        QuestionRef::persisted("q1"),
        5,
    )));

    let report = validate(&questions);
    assert_eq!(report.errors.len(), 1);
    assert!(report.error_messages()[0].contains("references non-existent option key: 5"));
}

// ============================================================================
// Compatibility
// ============================================================================

#[test]
fn test_dropped_condition_is_reported() {
    let before = branching_quiz();
    let mut after = before.clone();
    after[0].conditional_branches_mut().clear();

    let report = compare(&before, &after);
    assert_eq!(report.errors.len(), 1);
    assert!(report.error_messages()[0].contains("Conditional count mismatch (1 vs 0)"));
}

#[test]
fn test_save_assigning_ids_is_compatible() {
    let before = branching_quiz();
    let mut after = before.clone();
    after[0].set_id(Some("travel".into()));
    after[1].set_id(Some("where".into()));
    after[0].conditional_branches_mut()[0].target = QuestionRef::persisted("where");
    after[1].set_parent_link(Some(branchform::ParentLink::new(
        QuestionRef::persisted("travel"),
        0,
    )));

    assert!(compare(&before, &after).is_valid());
    assert!(validate(&after).is_valid());
}

#[test]
fn test_concurrent_delete_is_reported() {
    let before = branching_quiz();
    let after = QuestionEditor::default().delete(&before, 5).unwrap();
    let report = compare(&before, &after);
    assert!(report.errors.contains(&CompatError::Missing { position: 5 }));
    assert!(report.errors.contains(&CompatError::CountMismatch {
        position: 4,
        before: 1,
        after: 0,
    }));
}

// ============================================================================
// Mutations
// ============================================================================

#[test]
fn test_delete_shifts_later_targets() -> Result<()> {
    let questions = vec![
        Question::new("A", QuestionKind::single_choice(["x", "y"])).with_branch(0, 2usize),
        Question::new("B", QuestionKind::ShortAnswer).with_position(1),
        Question::new("C", QuestionKind::ShortAnswer)
            .with_position(2)
            .with_parent(0usize, 0),
    ];

    let result = QuestionEditor::default().delete(&questions, 1)?;
    assert_eq!(result.len(), 2);
    assert_eq!(result[1].title(), "C");
    assert_eq!(
        result[0].conditional_branches()[0].target,
        QuestionRef::positional(1)
    );
    assert_eq!(
        result[1].parent_link().map(|link| link.parent.clone()),
        Some(QuestionRef::positional(0))
    );
    assert!(validate(&result).is_valid());
    Ok(())
}

#[test]
fn test_delete_removes_exactly_inbound_branches() -> Result<()> {
    let editor = QuestionEditor::default();
    let questions = branching_quiz();

    let result = editor.delete(&questions, 1)?;
    assert!(!result[0].has_branches());
    // 4 -> 5 became 3 -> 4.
    assert_eq!(
        result[3].conditional_branches()[0].target,
        QuestionRef::positional(4)
    );
    assert!(validate(&result).is_valid());
    Ok(())
}

#[test]
fn test_delete_saved_parent_orphans_children_cleanly() -> Result<()> {
    let page = onboarding_form().pages[0].questions.clone();
    let result = QuestionEditor::default().delete(&page, 1)?;

    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|q| q.parent_link().is_none()));
    let report = validate(&result);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
    Ok(())
}

#[test]
fn test_duplicate_one_level_subtree() -> Result<()> {
    let questions = branching_quiz();
    let result = QuestionEditor::default().duplicate(&questions, 0)?;

    assert_eq!(result.len(), questions.len() + 2);
    assert_eq!(result[2].title(), questions[0].title());
    assert_eq!(result[3].title(), questions[1].title());
    assert!(result[2].parent_link().is_none());
    assert_eq!(
        result[2].conditional_branches()[0].target,
        QuestionRef::positional(3)
    );
    // The unrelated branch further down moved with its questions.
    assert_eq!(
        result[6].conditional_branches()[0].target,
        QuestionRef::positional(7)
    );
    assert_positions(&result);
    assert!(validate(&result).is_valid());
    Ok(())
}

#[test]
fn test_duplicate_deep_chain() -> Result<()> {
    let questions = deep_chain();
    let result = QuestionEditor::default().duplicate(&questions, 1)?;

    assert_eq!(result.len(), 1 + 2 * DEEP_CHAIN_LEN);
    let copied: Vec<usize> = std::iter::once(7).chain(descendants(&result, 7)).collect();
    assert_eq!(copied, vec![7, 8, 9, 10, 11, 12]);

    for index in 7..12 {
        assert_eq!(
            result[index].conditional_branches()[0].target,
            QuestionRef::positional(index + 1)
        );
        assert_eq!(result[index].title(), questions[index - 6].title());
    }
    assert_eq!(
        result[12].parent_link().map(|link| link.parent.clone()),
        Some(QuestionRef::positional(11))
    );
    // The original chain is untouched.
    assert_eq!(descendants(&result, 1), vec![2, 3, 4, 5, 6]);
    assert!(validate(&result).is_valid());
    Ok(())
}

#[test]
fn test_duplicate_clears_persisted_ids() -> Result<()> {
    let result = QuestionEditor::default().duplicate(&pet_survey(), 0)?;
    assert_eq!(result.len(), 4);
    assert!(result[2].id().is_none());
    assert!(result[3].id().is_none());
    assert_eq!(
        result[3].parent_link().map(|link| link.parent.clone()),
        Some(QuestionRef::positional(2))
    );
    assert!(validate(&result).is_valid());
    Ok(())
}

#[test]
fn test_add_condition_uses_config() -> Result<()> {
    let editor = QuestionEditor::new(EditorConfig {
        condition_question_kind: QuestionKind::Paragraph,
        new_question_title: "Tell us more".into(),
        ..EditorConfig::default()
    });
    let result = editor.add_condition(&branching_quiz(), 4, 1)?;

    assert_eq!(result.len(), 7);
    assert_eq!(result[5].title(), "Tell us more");
    assert_eq!(result[5].kind(), &QuestionKind::Paragraph);
    assert_eq!(result[4].conditional_branches()[0].option_index, 1);
    assert_eq!(
        result[4].conditional_branches()[1].target,
        QuestionRef::positional(6)
    );
    assert!(validate(&result).is_valid());
    Ok(())
}

#[test]
fn test_add_condition_rejects_invalid_requests() {
    let editor = QuestionEditor::default();
    let questions = branching_quiz();

    assert!(matches!(
        editor.add_condition(&questions, 1, 0),
        Err(MutationError::NotChoice { position: 1, .. })
    ));
    assert!(matches!(
        editor.add_condition(&questions, 0, 0),
        Err(MutationError::ConditionExists { option: 0, .. })
    ));
    assert!(matches!(
        editor.add_condition(&questions, 0, 9),
        Err(MutationError::UnknownOption { option: 9, .. })
    ));
    assert!(editor.add_condition(&questions, 40, 0).unwrap_err().is_out_of_range());
}

#[test]
fn test_remove_condition_modes() -> Result<()> {
    let editor = QuestionEditor::default();
    let questions = deep_chain();

    let unlinked = editor.remove_condition(&questions, 1, 0, RemovalMode::Unlink)?;
    assert_eq!(unlinked.len(), questions.len());
    assert!(unlinked[2].parent_link().is_none());
    assert!(validate(&unlinked).is_valid());

    let deleted = editor.remove_condition(&questions, 1, 0, RemovalMode::Delete)?;
    assert_eq!(deleted.len(), questions.len() - 1);
    assert!(!deleted[1].has_branches());
    assert!(validate(&deleted).is_valid());
    Ok(())
}

#[test]
fn test_remove_option_drops_its_condition() -> Result<()> {
    let result = QuestionEditor::default().remove_option(&pet_survey(), 0, 0, RemovalMode::Delete)?;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].options().len(), 1);
    assert!(!result[0].has_branches());
    assert!(validate(&result).is_valid());
    Ok(())
}

#[test]
fn test_move_keeps_links() -> Result<()> {
    let editor = QuestionEditor::default();
    let result = editor.move_question(&branching_quiz(), 5, 0)?;

    assert_eq!(result[0].title(), "Which one?");
    assert_eq!(
        result[5].conditional_branches()[0].target,
        QuestionRef::positional(0)
    );
    assert_positions(&result);
    assert!(validate(&result).is_valid());
    Ok(())
}

#[test]
fn test_every_edit_keeps_fixtures_consistent() -> Result<()> {
    let editor = QuestionEditor::default();
    for questions in fixtures() {
        let mut edited = vec![editor.append(&questions)];
        for position in 0..questions.len() {
            edited.push(editor.delete(&questions, position)?);
            edited.push(editor.duplicate(&questions, position)?);
            edited.push(editor.move_question(&questions, position, 0)?);
            if let Ok(added) = editor.add_condition(&questions, position, 1) {
                edited.push(added);
            }
        }
        for result in edited {
            assert_positions(&result);
            let report = validate(&result);
            assert!(report.is_valid(), "{:?}", report.error_messages());
        }
    }
    Ok(())
}

// ============================================================================
// Numbering
// ============================================================================

#[test]
fn test_hierarchical_labels() {
    assert_eq!(
        compute_labels(&branching_quiz(), 0),
        vec!["1", "1.1", "2", "3", "4", "4.1"]
    );
    assert_eq!(
        compute_labels(&deep_chain(), 0),
        vec![
            "1",
            "2",
            "2.1",
            "2.1.1",
            "2.1.1.1",
            "2.1.1.1.1",
            "2.1.1.1.1.1"
        ]
    );
}

#[test]
fn test_labels_follow_parent_prefix() {
    for questions in fixtures() {
        let labels = compute_labels(&questions, 0);
        assert_eq!(labels, compute_labels(&questions, 0));

        let mut last_top_level = 0;
        for (index, question) in questions.iter().enumerate() {
            match branchform::resolver::parent_index(&questions, question) {
                Some(parent) => {
                    assert!(labels[index].starts_with(&format!("{}.", labels[parent])));
                }
                None => {
                    let number: usize = labels[index].parse().unwrap();
                    assert!(number > last_top_level);
                    last_top_level = number;
                }
            }
        }
    }
}

#[test]
fn test_form_labels_continue_across_pages() {
    let labeled = label_form(&onboarding_form());
    let labels: Vec<Vec<&str>> = labeled
        .pages
        .iter()
        .map(|page| page.questions.iter().filter_map(Question::label).collect())
        .collect();
    assert_eq!(labels, vec![vec!["1", "2", "2.1", "2.2"], vec!["3", "4"]]);
    assert_eq!(labeled.pages[0].questions[3].parent_label(), Some("2"));
}

#[test]
fn test_strip_undoes_labels() {
    for questions in fixtures() {
        assert_eq!(strip_labels(&label(&questions, 4)), questions);
    }
}

// ============================================================================
// Responding
// ============================================================================

#[test]
fn test_visibility_follows_answers() {
    let questions = branching_quiz();
    let mut responses = Responses::new();
    assert_eq!(
        visible_questions(&questions, &responses),
        vec![true, false, true, true, true, false]
    );

    responses.insert(0usize, ResponseValue::ChosenOption(0));
    responses.insert(4usize, ResponseValue::ChosenOption(1));
    assert_eq!(
        visible_questions(&questions, &responses),
        vec![true, true, true, true, true, false]
    );
}

#[test]
fn test_deep_chain_reveals_one_level_per_answer() {
    let questions = deep_chain();
    let mut responses = Responses::new();
    for level in 1..=3usize {
        responses.insert(level, ResponseValue::ChosenOption(0));
    }
    let visible = visible_questions(&questions, &responses);
    assert_eq!(visible.iter().filter(|v| **v).count(), 5);
    assert!(!visible[5]);
}

#[test]
fn test_scripted_respondent_on_mixed_ids() -> Result<()> {
    let page = onboarding_form().pages[0].questions.clone();
    let responses = ScriptedRespondent::new()
        .with_text(QuestionRef::persisted("name"), "Ada")
        .with_option(QuestionRef::persisted("status"), 1)
        .with_text(QuestionRef::persisted("employer"), "ACME")
        .with_text(3usize, "MIT")
        .collect(&page)?;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses.get_text(&QuestionRef::positional(3))?, "MIT");
    assert!(!responses.contains(&QuestionRef::persisted("employer")));
    Ok(())
}

#[test]
fn test_scripted_respondent_requires_visible_answers() {
    let err = ScriptedRespondent::new()
        .with_option(QuestionRef::persisted("q1"), 1)
        .collect(&onboarding_form().pages[0].questions)
        .unwrap_err();
    assert_eq!(
        err,
        RespondentError::MissingAnswer(QuestionRef::persisted("name"))
    );
}

#[test]
fn test_scoring_counts_revealed_questions() -> Result<()> {
    let quiz = capital_quiz();
    let perfect = ScriptedRespondent::new()
        .with_option(0usize, 1)
        .with_option(1usize, 1)
        .with_options(2usize, vec![2, 0])
        .collect(&quiz)?;
    let report = score(&quiz, &perfect);
    assert_eq!((report.earned(), report.possible()), (3, 3));
    assert_eq!(report.ratio(), 1.0);

    let wrong = ScriptedRespondent::new()
        .with_option(0usize, 0)
        .with_option(1usize, 1)
        .with_options(2usize, vec![0])
        .collect(&quiz)?;
    let report = score(&quiz, &wrong);
    assert_eq!(report.possible(), 2);
    assert_eq!(report.earned(), 0);
    assert!(
        report
            .questions
            .iter()
            .all(|q| q.outcome == ScoreOutcome::Incorrect)
    );
    Ok(())
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_payload_round_trip() -> Result<()> {
    for questions in fixtures() {
        let payload = to_payload(&label(&questions, 0))?;
        assert_eq!(from_payload(payload)?, questions);
    }
    Ok(())
}

#[test]
fn test_form_payload_round_trip() -> Result<()> {
    let form = onboarding_form();
    let payload = form_to_payload(&label_form(&form))?;
    assert_eq!(payload["title"], "Onboarding");
    assert_eq!(form_from_payload(payload)?, form);
    Ok(())
}
