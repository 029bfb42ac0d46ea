use std::sync::Arc;

use rand::{CryptoRng, Rng};
use yao_circuits::{Circuit, Gate, GateType};
use yao_core::aes::{FixedKeyAes, FIXED_KEY_AES};
use zeroize::Zeroize;

use crate::{
    data::GarbledData,
    decoding::Decoding,
    encoding::{Delta, Label, LabelPair},
    table::{row_index, table_key, EncryptedRow, GarbledTable},
};

/// Errors that can occur during garbled circuit generation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum GeneratorError {
    #[error("invalid garbler input length: expected {expected}, got {actual}")]
    InputLength { expected: usize, actual: usize },
    #[error("generator not finished")]
    NotFinished,
}

/// Garbles a non-linear gate with a full 4-row point-and-permute table.
///
/// Returns the 0 label of the output wire.
#[inline]
pub(crate) fn table_gate<R: Rng + CryptoRng + ?Sized>(
    cipher: &FixedKeyAes,
    typ: GateType,
    x_0: &Label,
    y_0: &Label,
    delta: &Delta,
    gid: usize,
    rng: &mut R,
) -> (Label, GarbledTable) {
    let z_0 = Label::random(rng);
    let x = LabelPair::from_low(*x_0, delta);
    let y = LabelPair::from_low(*y_0, delta);
    let z = LabelPair::from_low(z_0, delta);

    let mut rows = [EncryptedRow::default(); 4];
    for a in [false, true] {
        for b in [false, true] {
            let (x_a, y_b) = (x.select(a), y.select(b));
            let key = table_key(cipher, &x_a, &y_b, gid);
            rows[row_index(&x_a, &y_b)] = EncryptedRow::encrypt(&key, z.select(typ.eval(a, b)));
        }
    }

    (z_0, GarbledTable::new(gid, rows))
}

/// Core generator type used to garble a circuit.
///
/// A generator owns the session secrets: the global offset and the 0 label of
/// every wire. Both are discarded when the generator is dropped, only the
/// garbled tables, the selected Garbler labels and the Evaluator label pairs
/// leave it through [`Generator::finish`].
pub struct Generator {
    /// Cipher to use to encrypt the gates
    cipher: &'static FixedKeyAes,
    /// The circuit being garbled
    circuit: Arc<Circuit>,
    /// Delta value to use while generating the circuit
    delta: Delta,
    /// The 0 bit labels for the garbled circuit
    low_labels: Vec<Option<Label>>,
    /// Tables of the non-linear gates, in gate order
    tables: Vec<GarbledTable>,
    /// Whether all gates have been garbled
    complete: bool,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("circuit", &self.circuit.id())
            .field("tables", &self.tables.len())
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Creates a new generator for the given circuit, sampling a fresh offset
    /// and a fresh label pair for every input wire.
    pub fn new<R: Rng + CryptoRng + ?Sized>(circuit: Arc<Circuit>, rng: &mut R) -> Self {
        let delta = Delta::random(rng);

        let mut low_labels: Vec<Option<Label>> = vec![None; circuit.wire_count()];
        low_labels[..circuit.input_size()]
            .iter_mut()
            .for_each(|label| *label = Some(Label::random(rng)));

        Self {
            cipher: &(*FIXED_KEY_AES),
            circuit,
            delta,
            low_labels,
            tables: Vec::new(),
            complete: false,
        }
    }

    /// Returns the circuit being garbled.
    pub fn circuit(&self) -> &Arc<Circuit> {
        &self.circuit
    }

    /// Returns the global offset of this session.
    ///
    /// The offset must never be sent to the Evaluator.
    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    /// Returns both labels of a wire, if it has been assigned.
    pub fn label_pair(&self, wire: usize) -> Option<LabelPair> {
        self.low_labels
            .get(wire)
            .copied()
            .flatten()
            .map(|low| LabelPair::from_low(low, &self.delta))
    }

    /// Returns whether the generator has finished garbling the circuit.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Garbles every gate of the circuit in order.
    ///
    /// Linear gates are free: XOR and XNOR combine the input 0 labels, INV
    /// and EQW pass the input 0 label through, shifted by the offset for
    /// inversions. Non-linear gates produce a [`GarbledTable`].
    pub fn generate<R: Rng + CryptoRng + ?Sized>(&mut self, rng: &mut R) -> &[GarbledTable] {
        if self.complete {
            return &self.tables;
        }

        let low_labels = &mut self.low_labels;
        let mut tables = Vec::with_capacity(self.circuit.and_count());
        for gate in self.circuit.gates() {
            let x_0 = low_labels[gate.x()].expect("feed should be initialized");
            let z_0 = match *gate {
                Gate::Xor { y, .. } => x_0 ^ low_labels[y].expect("feed should be initialized"),
                Gate::Xnor { y, .. } => {
                    x_0 ^ low_labels[y].expect("feed should be initialized") ^ &self.delta
                }
                Gate::Inv { .. } => x_0 ^ &self.delta,
                Gate::Eqw { .. } => x_0,
                Gate::And { id, y, .. } | Gate::Or { id, y, .. } => {
                    let y_0 = low_labels[y].expect("feed should be initialized");
                    let (z_0, table) = table_gate(
                        self.cipher,
                        gate.gate_type(),
                        &x_0,
                        &y_0,
                        &self.delta,
                        id,
                        rng,
                    );
                    tables.push(table);
                    z_0
                }
            };
            low_labels[gate.z()] = Some(z_0);
        }

        tracing::debug!(
            gates = self.circuit.gates_count(),
            tables = tables.len(),
            "garbled circuit"
        );

        self.tables = tables;
        self.complete = true;
        &self.tables
    }

    /// Consumes the generator and assembles the garbled data.
    ///
    /// # Arguments
    ///
    /// * `garbler_input` - The Garbler's private input bits, used to select
    ///   its own input labels.
    pub fn finish(mut self, garbler_input: &[bool]) -> Result<GarbledData, GeneratorError> {
        if !self.complete {
            return Err(GeneratorError::NotFinished);
        }

        let expected = self.circuit.garbler_input_size();
        if garbler_input.len() != expected {
            return Err(GeneratorError::InputLength {
                expected,
                actual: garbler_input.len(),
            });
        }

        let pair = |wire: usize| self.label_pair(wire).expect("feed should be initialized");

        let garbler_labels = garbler_input
            .iter()
            .enumerate()
            .map(|(wire, bit)| pair(wire).select(*bit))
            .collect();

        let evaluator_labels = (expected..self.circuit.input_size()).map(pair).collect();

        let decoding = Decoding::new(self.circuit.output_wires().map(|wire| (wire, pair(wire))));

        Ok(GarbledData::new(
            self.circuit.clone(),
            garbler_labels,
            evaluator_labels,
            std::mem::take(&mut self.tables),
            decoding,
        ))
    }

    fn wipe(&mut self) {
        self.low_labels.zeroize();
    }
}

impl Drop for Generator {
    fn drop(&mut self) {
        self.wipe();
    }
}

/// Garbles `circuit` in one call.
///
/// Samples a fresh offset and fresh labels, garbles every gate and selects the
/// Garbler's input labels by `garbler_input`.
pub fn garble<R: Rng + CryptoRng + ?Sized>(
    circuit: Arc<Circuit>,
    garbler_input: &[bool],
    rng: &mut R,
) -> Result<GarbledData, GeneratorError> {
    if garbler_input.len() != circuit.garbler_input_size() {
        return Err(GeneratorError::InputLength {
            expected: circuit.garbler_input_size(),
            actual: garbler_input.len(),
        });
    }

    let mut gen = Generator::new(circuit, rng);
    gen.generate(rng);
    gen.finish(garbler_input)
}
