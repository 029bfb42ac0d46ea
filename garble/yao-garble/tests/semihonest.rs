use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rstest::rstest;

use yao_circuits::{Circuit, CircuitError, ParseError};
use yao_garble::{Input, Role, Session, SessionConfig, SessionError};
use yao_garble_core::{GarbledData, IntegrityError, Label};
use yao_ot_core::{
    ideal::{IdealReceiver, IdealSender},
    OtReceiver,
};

const AND: &str = "1 3\n2 1 1\n1 1\n\n2 1 0 1 2 AND\n";
const NOT_XOR: &str = "2 4\n2 1 1\n1 1\n\n1 1 0 2 INV\n2 1 2 1 3 XOR\n";
// 2-bit adder, outputs are sum (2 bits) and carry.
const ADDER: &str = "7 11\n2 2 2\n1 3\n\n\
    2 1 0 2 4 AND\n\
    2 1 1 3 5 XOR\n\
    2 1 1 3 6 AND\n\
    2 1 5 4 7 AND\n\
    2 1 0 2 8 XOR\n\
    2 1 5 4 9 XOR\n\
    2 1 7 6 10 OR\n";

// XNOR, EQW, INV, OR, AND and XOR in one circuit.
const MIXED: &str = "7 11\n2 2 2\n1 3\n\n\
    2 1 0 2 4 XNOR\n\
    1 1 4 5 EQW\n\
    1 1 1 6 INV\n\
    2 1 6 3 7 OR\n\
    2 1 5 7 8 AND\n\
    2 1 8 0 9 XOR\n\
    1 1 7 10 EQW\n";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Runs both parties to completion, returning the Evaluator's output and the
/// number of garbled tables.
fn run(
    circuit: &str,
    config: SessionConfig,
    garbler_input: impl Into<Input>,
    evaluator_input: impl Into<Input>,
) -> Result<(Vec<bool>, usize), SessionError> {
    init_tracing();
    let mut rng = ChaCha12Rng::seed_from_u64(0);

    let mut garbler = Session::load_circuit_text(Role::Garbler, circuit, config.clone())?;
    let mut evaluator = Session::load_circuit_text(Role::Evaluator, circuit, config)?;

    garbler.set_input(garbler_input)?;
    evaluator.set_input(evaluator_input)?;

    let mut garbled = garbler.generate_garbling(&mut rng)?;

    let receiver = IdealReceiver::new(evaluator.choices()?.to_vec());
    let sender = IdealSender::new(receiver.commitment());
    let msgs = garbler.send_evaluator_labels(&mut garbled, &sender)?;
    garbler.finish()?;

    let garbled = GarbledData::from_bytes(&garbled.to_bytes()?)?;
    let table_count = garbled.tables().len();

    let mut assignment = garbled.garbler_labels().to_vec();
    assignment.extend(evaluator.receive_evaluator_labels(&receiver, &msgs)?);

    let output = evaluator.evaluate_circuit(&garbled, &assignment)?;
    evaluator.finish()?;

    Ok((output, table_count))
}

#[rstest]
#[case(true, true, true)]
#[case(true, false, false)]
#[case(false, true, false)]
#[case(false, false, false)]
fn test_and_truth_table(#[case] a: bool, #[case] b: bool, #[case] expected: bool) {
    let (output, tables) = run(AND, SessionConfig::default(), vec![a], vec![b]).unwrap();

    assert_eq!(output, vec![expected]);
    assert_eq!(tables, 1);
}

#[test]
fn test_linear_circuit_has_no_tables() {
    // NOT(0) XOR 1
    let (output, tables) = run(NOT_XOR, SessionConfig::default(), vec![false], vec![true]).unwrap();

    assert_eq!(output, vec![false]);
    assert_eq!(tables, 0);
}

#[rstest]
#[case(0, 0)]
#[case(1, 2)]
#[case(3, 3)]
#[case(2, 3)]
fn test_adder(#[case] a: u64, #[case] b: u64) {
    let config = SessionConfig::builder().parallel_ot(false).build().unwrap();
    let (output, tables) = run(ADDER, config, a, b).unwrap();

    let sum = a + b;
    let expected: Vec<bool> = (0..3).map(|i| (sum >> i) & 1 == 1).collect();
    assert_eq!(output, expected);
    assert_eq!(tables, 4);
}

#[rstest]
fn test_mixed_gates(#[values(0, 1, 2, 3)] a: u64, #[values(0, 1, 2, 3)] b: u64) {
    let bits = |n: u64| vec![n & 1 == 1, n & 2 == 2];
    let expected = Circuit::parse(MIXED)
        .unwrap()
        .evaluate(&bits(a), &bits(b))
        .unwrap();

    let (output, tables) = run(MIXED, SessionConfig::default(), a, b).unwrap();

    assert_eq!(output, expected);
    assert_eq!(tables, 2);
}

#[test]
fn test_hex_input() {
    let (output, _) = run(
        ADDER,
        SessionConfig::default(),
        Input::Hex("0x2".into()),
        Input::Hex("3".into()),
    )
    .unwrap();

    // 2 + 3 = 5
    assert_eq!(output, vec![true, false, true]);
}

#[test]
fn test_input_overflow() {
    let err = run(ADDER, SessionConfig::default(), 4u64, 0u64).unwrap_err();

    assert!(matches!(
        err,
        SessionError::LengthMismatch {
            expected: 2,
            actual: 3,
            ..
        }
    ));
}

#[test]
fn test_parse_error() {
    let text = "1 10\n2 1 1\n1 1\n\n2 1 0 99 2 AND\n";
    let err = Session::load_circuit_text(Role::Garbler, text, SessionConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        SessionError::Parse(ParseError::Circuit(CircuitError::WireOutOfRange {
            wire: 99,
            ..
        }))
    ));
}

#[test]
fn test_wrong_role() {
    let mut rng = ChaCha12Rng::seed_from_u64(0);
    let mut evaluator =
        Session::load_circuit_text(Role::Evaluator, AND, SessionConfig::default()).unwrap();
    evaluator.set_input(vec![true]).unwrap();

    let err = evaluator.generate_garbling(&mut rng).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Role {
            expected: Role::Garbler,
            actual: Role::Evaluator,
            ..
        }
    ));

    // The session is unusable after any error.
    assert!(evaluator.is_poisoned());
    assert!(matches!(
        evaluator.choices(),
        Err(SessionError::State(_))
    ));
    assert!(evaluator.finish().is_err());
}

#[test]
fn test_short_assignment() {
    let mut rng = ChaCha12Rng::seed_from_u64(0);
    let mut garbler =
        Session::load_circuit_text(Role::Garbler, AND, SessionConfig::default()).unwrap();
    let mut evaluator =
        Session::load_circuit_text(Role::Evaluator, AND, SessionConfig::default()).unwrap();

    garbler.set_input(vec![true]).unwrap();
    evaluator.set_input(vec![true]).unwrap();
    let garbled = garbler.generate_garbling(&mut rng).unwrap();

    let err = evaluator
        .evaluate_circuit(&garbled, garbled.garbler_labels())
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::LengthMismatch {
            expected: 2,
            actual: 1,
            ..
        }
    ));
    assert!(evaluator.is_poisoned());
}

#[test]
fn test_wrong_label_is_detected() {
    let mut rng = ChaCha12Rng::seed_from_u64(0);
    let mut garbler =
        Session::load_circuit_text(Role::Garbler, AND, SessionConfig::default()).unwrap();
    let mut evaluator =
        Session::load_circuit_text(Role::Evaluator, AND, SessionConfig::default()).unwrap();

    garbler.set_input(vec![true]).unwrap();
    evaluator.set_input(vec![true]).unwrap();
    let garbled = garbler.generate_garbling(&mut rng).unwrap();

    let assignment = vec![garbled.garbler_labels()[0], Label::random(&mut rng)];
    let err = evaluator.evaluate_circuit(&garbled, &assignment).unwrap_err();

    assert!(matches!(
        err,
        SessionError::Integrity(IntegrityError::InvalidRow { gate: 0 })
    ));
}

#[test]
fn test_circuit_mismatch() {
    let mut rng = ChaCha12Rng::seed_from_u64(0);
    let or = "1 3\n2 1 1\n1 1\n\n2 1 0 1 2 OR\n";
    let mut garbler =
        Session::load_circuit_text(Role::Garbler, or, SessionConfig::default()).unwrap();
    let mut evaluator =
        Session::load_circuit_text(Role::Evaluator, AND, SessionConfig::default()).unwrap();

    garbler.set_input(vec![true]).unwrap();
    evaluator.set_input(vec![true]).unwrap();
    let garbled = garbler.generate_garbling(&mut rng).unwrap();

    let err = evaluator.evaluate_circuit(&garbled, &[]).unwrap_err();

    assert!(matches!(
        err,
        SessionError::Integrity(IntegrityError::CircuitMismatch)
    ));
}

#[test]
fn test_input_discarded_after_evaluation() {
    let mut rng = ChaCha12Rng::seed_from_u64(0);
    let mut garbler =
        Session::load_circuit_text(Role::Garbler, AND, SessionConfig::default()).unwrap();
    let mut evaluator =
        Session::load_circuit_text(Role::Evaluator, AND, SessionConfig::default()).unwrap();

    garbler.set_input(vec![true]).unwrap();
    evaluator.set_input(vec![true]).unwrap();
    let mut garbled = garbler.generate_garbling(&mut rng).unwrap();

    let receiver = IdealReceiver::new(evaluator.choices().unwrap().to_vec());
    let sender = IdealSender::new(receiver.commitment());
    let msgs = garbler.send_evaluator_labels(&mut garbled, &sender).unwrap();

    let mut assignment = garbled.garbler_labels().to_vec();
    assignment.extend(evaluator.receive_evaluator_labels(&receiver, &msgs).unwrap());
    assert_eq!(evaluator.evaluate_circuit(&garbled, &assignment).unwrap(), vec![true]);

    assert!(matches!(
        evaluator.choices(),
        Err(SessionError::State("input not set"))
    ));
}

#[test]
fn test_garbling_requires_input() {
    let mut rng = ChaCha12Rng::seed_from_u64(0);
    let mut garbler =
        Session::load_circuit_text(Role::Garbler, AND, SessionConfig::default()).unwrap();

    assert!(matches!(
        garbler.generate_garbling(&mut rng),
        Err(SessionError::State(_))
    ));
}
