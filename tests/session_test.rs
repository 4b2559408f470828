//! Tests for scripted command sessions

use rstest::rstest;

use orgtree::application::{parse_commands, ApplicationError, Command, Outcome, Session};
use orgtree::domain::{DomainError, EmployeeId, Hierarchy};
use orgtree::infrastructure::sample_organization;
use orgtree::util::testing;

fn session() -> Session {
    testing::init_test_setup();
    Session::new(Hierarchy::new(sample_organization()).unwrap())
}

// ============================================================
// Parsing
// ============================================================

#[rstest]
#[case("move 5 14", Command::Move { employee: EmployeeId(5), supervisor: EmployeeId(14) })]
#[case("move 5:14", Command::Move { employee: EmployeeId(5), supervisor: EmployeeId(14) })]
#[case("  MOVE   20 9 ", Command::Move { employee: EmployeeId(20), supervisor: EmployeeId(9) })]
#[case("undo", Command::Undo)]
#[case("Redo", Command::Redo)]
fn given_valid_text_when_parsing_then_returns_command(#[case] input: &str, #[case] expected: Command) {
    assert_eq!(input.parse::<Command>().unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("move 5")]
#[case("move five 14")]
#[case("move 5 14 3")]
#[case("promote 5")]
fn given_invalid_text_when_parsing_then_invalid_command(#[case] input: &str) {
    let result = input.parse::<Command>();
    assert!(
        matches!(result, Err(ApplicationError::InvalidCommand { .. })),
        "expected InvalidCommand for {:?}, got {:?}",
        input,
        result
    );
}

#[test]
fn given_command_when_displaying_then_parses_back() {
    let command = Command::Move {
        employee: EmployeeId(11),
        supervisor: EmployeeId(9),
    };
    assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
}

// ============================================================
// Applying
// ============================================================

#[test]
fn given_script_when_applying_all_then_reports_each_outcome() {
    let mut session = session();
    let commands = parse_commands(&["move 5 14", "move 5 14", "undo", "redo"]).unwrap();

    let outcomes = session.apply_all(&commands).unwrap();

    assert_eq!(outcomes.len(), 4);
    assert!(matches!(outcomes[0], Outcome::Moved(t) if t.to == EmployeeId(14)));
    assert_eq!(
        outcomes[1],
        Outcome::Unchanged {
            employee: EmployeeId(5),
            supervisor: EmployeeId(14)
        }
    );
    assert!(matches!(outcomes[2], Outcome::Undone(t) if t.from == EmployeeId(2)));
    assert!(matches!(outcomes[3], Outcome::Redone(_)));
    assert_eq!(
        session.hierarchy().supervisor_of(EmployeeId(5)).unwrap(),
        Some(EmployeeId(14))
    );
}

#[test]
fn given_failing_command_when_applying_all_then_stops_and_keeps_earlier_edits() {
    let mut session = session();
    let commands = parse_commands(&["move 6 9", "move 1 2", "move 20 9"]).unwrap();

    let result = session.apply_all(&commands);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidMove { .. }))
    ));
    let hierarchy = session.into_hierarchy();
    assert_eq!(hierarchy.supervisor_of(EmployeeId(6)).unwrap(), Some(EmployeeId(9)));
    assert_eq!(hierarchy.supervisor_of(EmployeeId(20)).unwrap(), Some(EmployeeId(15)));
    assert_eq!(hierarchy.history().len(), 1);
}

#[test]
fn given_fresh_session_when_undoing_then_domain_error_surfaces() {
    let mut session = session();

    let err = session.apply(Command::Undo).unwrap_err();

    assert_eq!(err.to_string(), "nothing to undo");
}
