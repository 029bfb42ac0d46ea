use crate::{
    circuit::{Circuit, CircuitError},
    components::{Gate, GateType},
};

/// Errors that can occur while parsing a circuit description.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("missing header line: expecting {0}")]
    MissingHeader(&'static str),
    #[error("line {line}: malformed header, expecting {expected}")]
    MalformedHeader { line: usize, expected: &'static str },
    #[error("line {line}: failed to parse {token:?} as a number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: unsupported gate type {token:?}")]
    UnknownGate { line: usize, token: String },
    #[error("line {line}: malformed gate, expecting `<n_in> <n_out> <inputs..> <output> <TYPE>`")]
    MalformedGate { line: usize },
    #[error("line {line}: {typ} gate takes {expected} inputs and 1 output, got {inputs} and {outputs}")]
    Arity {
        line: usize,
        typ: GateType,
        expected: usize,
        inputs: usize,
        outputs: usize,
    },
    #[error("expecting {expected} gates, parsed {actual}")]
    GateCountMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

fn parse_number(line: usize, token: &str) -> Result<usize, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_numbers(line: usize, text: &str) -> Result<Vec<usize>, ParseError> {
    text.split_whitespace()
        .map(|token| parse_number(line, token))
        .collect()
}

impl Circuit {
    /// Parses a circuit in Bristol Fashion format as specified here:
    /// `https://homes.esat.kuleuven.be/~nsmart/MPC/`
    ///
    /// The circuit must declare exactly two input values: the first belongs to
    /// the Garbler, the second to the Evaluator.
    ///
    /// ```text
    /// <ngates> <nwires>
    /// 2 <garbler_input_size> <evaluator_input_size>
    /// <noutputs> <output_0_nwires> ...
    ///
    /// 2 1 0 1 2 AND
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        // Parse first line: ngates nwires
        let (line, header) = lines.next().ok_or(ParseError::MissingHeader("ngates nwires"))?;
        let (gate_count, wire_count) = match parse_numbers(line, header)?[..] {
            [gate_count, wire_count] => (gate_count, wire_count),
            _ => {
                return Err(ParseError::MalformedHeader {
                    line,
                    expected: "ngates nwires",
                })
            }
        };

        // Parse second line: 2 garbler_nwires evaluator_nwires
        let (line, header) = lines
            .next()
            .ok_or(ParseError::MissingHeader("2 garbler_nwires evaluator_nwires"))?;
        let (garbler_input_size, evaluator_input_size) = match parse_numbers(line, header)?[..] {
            [2, garbler, evaluator] => (garbler, evaluator),
            _ => {
                return Err(ParseError::MalformedHeader {
                    line,
                    expected: "2 garbler_nwires evaluator_nwires",
                })
            }
        };

        // Parse third line: noutputs output_0_nwires output_1_nwires...
        let (line, header) = lines
            .next()
            .ok_or(ParseError::MissingHeader("noutputs output_nwires.."))?;
        let output_line = parse_numbers(line, header)?;
        let output_sizes = match output_line.split_first() {
            Some((count, sizes)) if *count == sizes.len() => sizes.to_vec(),
            _ => {
                return Err(ParseError::MalformedHeader {
                    line,
                    expected: "noutputs output_nwires..",
                })
            }
        };

        let mut gates = Vec::new();
        for (line, text) in lines {
            gates.push(parse_gate(line, text, gates.len())?);
        }

        if gates.len() != gate_count {
            return Err(ParseError::GateCountMismatch {
                expected: gate_count,
                actual: gates.len(),
            });
        }

        let circuit = Circuit::new(
            wire_count,
            garbler_input_size,
            evaluator_input_size,
            output_sizes,
            gates,
        )?;

        tracing::debug!(
            gates = circuit.gates_count(),
            and_gates = circuit.and_count(),
            wires = circuit.wire_count(),
            "parsed circuit"
        );

        Ok(circuit)
    }
}

fn parse_gate(line: usize, text: &str, id: usize) -> Result<Gate, ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let (typ, numbers) = match tokens.split_last() {
        Some((typ, numbers)) if numbers.len() >= 2 => (*typ, numbers),
        _ => return Err(ParseError::MalformedGate { line }),
    };

    let typ = GateType::from_token(typ).ok_or_else(|| ParseError::UnknownGate {
        line,
        token: typ.to_string(),
    })?;

    let numbers = numbers
        .iter()
        .map(|token| parse_number(line, token))
        .collect::<Result<Vec<_>, _>>()?;
    let (inputs, outputs) = (numbers[0], numbers[1]);
    let wires = &numbers[2..];

    if inputs != typ.arity() || outputs != 1 {
        return Err(ParseError::Arity {
            line,
            typ,
            expected: typ.arity(),
            inputs,
            outputs,
        });
    }

    if wires.len() != inputs + outputs {
        return Err(ParseError::MalformedGate { line });
    }

    let x = wires[0];
    let z = wires[wires.len() - 1];
    let y = if typ.arity() == 2 { wires[1] } else { x };

    Ok(Gate::new(typ, id, x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NOT_XOR: &str = "2 4\n2 1 1\n1 1\n\n1 1 0 2 INV\n2 1 2 1 3 XOR\n";

    #[test]
    fn test_parse() {
        let circ = Circuit::parse(NOT_XOR).unwrap();

        assert_eq!(circ.wire_count(), 4);
        assert_eq!(circ.garbler_input_size(), 1);
        assert_eq!(circ.evaluator_input_size(), 1);
        assert_eq!(circ.output_size(), 1);
        assert_eq!(
            circ.gates(),
            &[
                Gate::Inv { id: 0, x: 0, z: 2 },
                Gate::Xor { id: 1, x: 2, y: 1, z: 3 }
            ]
        );
        assert_eq!(circ.evaluate(&[false], &[true]).unwrap(), vec![false]);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let text = "\n  2 4 \n2  1 1\n1 1\n\n\n 1 1 0 2 NOT \n2 1 2 1 3 XOR";
        assert_eq!(Circuit::parse(text).unwrap(), Circuit::parse(NOT_XOR).unwrap());
    }

    #[test]
    fn test_wire_out_of_range() {
        let text = "1 10\n2 1 1\n1 1\n\n2 1 0 99 9 AND\n";
        assert_eq!(
            Circuit::parse(text).unwrap_err(),
            ParseError::Circuit(CircuitError::WireOutOfRange {
                gate: 0,
                wire: 99,
                wire_count: 10
            })
        );
    }

    #[test]
    fn test_unknown_gate() {
        let text = "1 3\n2 1 1\n1 1\n\n2 1 0 1 2 NAND\n";
        assert!(matches!(
            Circuit::parse(text).unwrap_err(),
            ParseError::UnknownGate { line: 5, .. }
        ));
    }

    #[test]
    fn test_gate_count_mismatch() {
        let text = "3 4\n2 1 1\n1 1\n\n1 1 0 2 INV\n2 1 2 1 3 XOR\n";
        assert_eq!(
            Circuit::parse(text).unwrap_err(),
            ParseError::GateCountMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let text = "1 3\n2 1 1\n1 1\n\n1 1 0 2 AND\n";
        assert!(matches!(
            Circuit::parse(text).unwrap_err(),
            ParseError::Arity { expected: 2, inputs: 1, .. }
        ));
    }

    #[test]
    fn test_wire_list_length_mismatch() {
        let text = "1 3\n2 1 1\n1 1\n\n2 1 0 2 AND\n";
        assert_eq!(
            Circuit::parse(text).unwrap_err(),
            ParseError::MalformedGate { line: 5 }
        );
    }

    #[test]
    fn test_oversized_headers_are_rejected() {
        let text = "18446744073709551615 3\n2 1 1\n1 1\n\n2 1 0 1 2 AND\n";
        assert_eq!(
            Circuit::parse(text).unwrap_err(),
            ParseError::GateCountMismatch {
                expected: usize::MAX,
                actual: 1
            }
        );

        let text = "0 3\n2 18446744073709551615 1\n1 1\n";
        assert_eq!(
            Circuit::parse(text).unwrap_err(),
            ParseError::Circuit(CircuitError::SizeOverflow)
        );

        let text = "1 3\n2 1 1\n2 1 18446744073709551615\n\n2 1 0 1 2 AND\n";
        assert_eq!(
            Circuit::parse(text).unwrap_err(),
            ParseError::Circuit(CircuitError::SizeOverflow)
        );

        let text = "1 18446744073709551615\n2 1 1\n1 1\n\n2 1 0 1 2 AND\n";
        assert_eq!(
            Circuit::parse(text).unwrap_err(),
            ParseError::Circuit(CircuitError::UndefinedWires {
                wire_count: usize::MAX,
                defined: 3
            })
        );
    }

    #[test]
    fn test_malformed_headers() {
        assert_eq!(Circuit::parse("").unwrap_err(), ParseError::MissingHeader("ngates nwires"));
        assert!(matches!(
            Circuit::parse("1 3 7\n2 1 1\n1 1\n").unwrap_err(),
            ParseError::MalformedHeader { line: 1, .. }
        ));
        assert!(matches!(
            Circuit::parse("1 3\n3 1 1 1\n1 1\n").unwrap_err(),
            ParseError::MalformedHeader { line: 2, .. }
        ));
        assert!(matches!(
            Circuit::parse("1 3\n2 1 1\n2 1\n").unwrap_err(),
            ParseError::MalformedHeader { line: 3, .. }
        ));
        assert!(matches!(
            Circuit::parse("x 3\n2 1 1\n1 1\n").unwrap_err(),
            ParseError::InvalidNumber { line: 1, .. }
        ));
    }
}
