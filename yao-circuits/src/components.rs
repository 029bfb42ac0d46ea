use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

/// A binary logic gate.
///
/// `id` is the position of the gate in its circuit, `x` and `y` are input
/// wire indices and `z` is the output wire index.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Gate {
    /// XOR gate.
    Xor { id: usize, x: usize, y: usize, z: usize },
    /// XNOR gate.
    Xnor { id: usize, x: usize, y: usize, z: usize },
    /// AND gate.
    And { id: usize, x: usize, y: usize, z: usize },
    /// OR gate.
    Or { id: usize, x: usize, y: usize, z: usize },
    /// Inverter gate.
    Inv { id: usize, x: usize, z: usize },
    /// Wire copy.
    Eqw { id: usize, x: usize, z: usize },
}

impl Gate {
    /// Creates a gate of the given type.
    ///
    /// `y` is ignored for unary gates.
    pub fn new(typ: GateType, id: usize, x: usize, y: usize, z: usize) -> Self {
        match typ {
            GateType::Xor => Gate::Xor { id, x, y, z },
            GateType::Xnor => Gate::Xnor { id, x, y, z },
            GateType::And => Gate::And { id, x, y, z },
            GateType::Or => Gate::Or { id, x, y, z },
            GateType::Inv => Gate::Inv { id, x, z },
            GateType::Eqw => Gate::Eqw { id, x, z },
        }
    }

    /// Returns the type of the gate.
    pub fn gate_type(&self) -> GateType {
        match self {
            Gate::Xor { .. } => GateType::Xor,
            Gate::Xnor { .. } => GateType::Xnor,
            Gate::And { .. } => GateType::And,
            Gate::Or { .. } => GateType::Or,
            Gate::Inv { .. } => GateType::Inv,
            Gate::Eqw { .. } => GateType::Eqw,
        }
    }

    /// Returns the id of the gate.
    pub fn id(&self) -> usize {
        match self {
            Gate::Xor { id, .. }
            | Gate::Xnor { id, .. }
            | Gate::And { id, .. }
            | Gate::Or { id, .. }
            | Gate::Inv { id, .. }
            | Gate::Eqw { id, .. } => *id,
        }
    }

    /// Returns the x input of the gate.
    pub fn x(&self) -> usize {
        match self {
            Gate::Xor { x, .. }
            | Gate::Xnor { x, .. }
            | Gate::And { x, .. }
            | Gate::Or { x, .. }
            | Gate::Inv { x, .. }
            | Gate::Eqw { x, .. } => *x,
        }
    }

    /// Returns the y input of the gate.
    pub fn y(&self) -> Option<usize> {
        match self {
            Gate::Xor { y, .. } | Gate::Xnor { y, .. } | Gate::And { y, .. } | Gate::Or { y, .. } => {
                Some(*y)
            }
            Gate::Inv { .. } | Gate::Eqw { .. } => None,
        }
    }

    /// Returns the z output of the gate.
    pub fn z(&self) -> usize {
        match self {
            Gate::Xor { z, .. }
            | Gate::Xnor { z, .. }
            | Gate::And { z, .. }
            | Gate::Or { z, .. }
            | Gate::Inv { z, .. }
            | Gate::Eqw { z, .. } => *z,
        }
    }

    /// Returns the input wires of the gate.
    pub fn inputs(&self) -> impl Iterator<Item = usize> {
        std::iter::once(self.x()).chain(self.y())
    }
}

impl Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.y() {
            Some(y) => write!(f, "{} ({}, {}, {})", self.gate_type(), self.x(), y, self.z()),
            None => write!(f, "{} ({}, {})", self.gate_type(), self.x(), self.z()),
        }
    }
}

/// The type of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateType {
    /// XOR gate.
    Xor,
    /// XNOR gate.
    Xnor,
    /// AND gate.
    And,
    /// OR gate.
    Or,
    /// Inverter gate.
    Inv,
    /// Wire copy.
    Eqw,
}

impl GateType {
    /// Resolves a Bristol Fashion gate token.
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "XOR" => GateType::Xor,
            "XNOR" => GateType::Xnor,
            "AND" => GateType::And,
            "OR" => GateType::Or,
            "INV" | "NOT" => GateType::Inv,
            "EQW" => GateType::Eqw,
            _ => return None,
        })
    }

    /// Returns the number of input wires.
    pub fn arity(&self) -> usize {
        match self {
            GateType::Xor | GateType::Xnor | GateType::And | GateType::Or => 2,
            GateType::Inv | GateType::Eqw => 1,
        }
    }

    /// Returns whether the gate is linear over GF(2), i.e. whether it can be
    /// garbled without a table.
    pub fn is_linear(&self) -> bool {
        !matches!(self, GateType::And | GateType::Or)
    }

    /// Computes the gate on plaintext bits. `y` is ignored for unary gates.
    pub fn eval(&self, x: bool, y: bool) -> bool {
        match self {
            GateType::Xor => x ^ y,
            GateType::Xnor => !(x ^ y),
            GateType::And => x & y,
            GateType::Or => x | y,
            GateType::Inv => !x,
            GateType::Eqw => x,
        }
    }

    pub(crate) fn tag(&self) -> u8 {
        match self {
            GateType::Xor => 0,
            GateType::Xnor => 1,
            GateType::And => 2,
            GateType::Or => 3,
            GateType::Inv => 4,
            GateType::Eqw => 5,
        }
    }
}

impl Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GateType::Xor => "XOR",
            GateType::Xnor => "XNOR",
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Inv => "INV",
            GateType::Eqw => "EQW",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AND", GateType::And)]
    #[case("OR", GateType::Or)]
    #[case("XOR", GateType::Xor)]
    #[case("XNOR", GateType::Xnor)]
    #[case("INV", GateType::Inv)]
    #[case("NOT", GateType::Inv)]
    #[case("EQW", GateType::Eqw)]
    fn test_from_token(#[case] token: &str, #[case] expected: GateType) {
        assert_eq!(GateType::from_token(token), Some(expected));
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(GateType::from_token("NAND"), None);
        assert_eq!(GateType::from_token("and"), None);
    }

    #[test]
    fn test_linearity() {
        assert!(GateType::Xor.is_linear());
        assert!(GateType::Inv.is_linear());
        assert!(!GateType::And.is_linear());
        assert!(!GateType::Or.is_linear());
    }

    #[test]
    fn test_gate_accessors() {
        let gate = Gate::new(GateType::Inv, 3, 1, 99, 4);
        assert_eq!(gate, Gate::Inv { id: 3, x: 1, z: 4 });
        assert_eq!(gate.y(), None);
        assert_eq!(gate.inputs().collect::<Vec<_>>(), vec![1]);
        assert_eq!(format!("{gate:?}"), "INV (1, 4)");
    }
}
