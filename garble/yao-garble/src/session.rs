use std::sync::Arc;

use rand::{CryptoRng, Rng};
use yao_circuits::Circuit;
use yao_garble_core::{evaluate, garble, GarbledData, IntegrityError, Label};
use yao_ot_core::{OtReceiver, OtSender};

use crate::{
    config::{Role, SessionConfig},
    error::SessionError,
    input::Input,
    ot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    // Garbled by the Garbler, or labels received by the Evaluator.
    Prepared,
    Done,
    Poisoned,
}

/// One party's view of a two-party computation.
///
/// A session is single-use. The Garbler sets its input, garbles the circuit
/// and sends the Evaluator's labels through oblivious transfer. The Evaluator
/// sets its input, receives its labels and evaluates. The private input is
/// discarded once the party's last step completes. Any error poisons the
/// session and discards it as well.
pub struct Session {
    role: Role,
    config: SessionConfig,
    circuit: Arc<Circuit>,
    input: Option<Vec<bool>>,
    state: State,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("role", &self.role)
            .field("config", &self.config)
            .field("circuit", &self.circuit.id())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a new session for a parsed circuit.
    pub fn new(role: Role, circuit: impl Into<Arc<Circuit>>, config: SessionConfig) -> Self {
        Self {
            role,
            config,
            circuit: circuit.into(),
            input: None,
            state: State::Ready,
        }
    }

    /// Creates a new session from circuit text.
    pub fn load_circuit_text(
        role: Role,
        text: &str,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let circuit = Circuit::parse(text)?;
        Ok(Self::new(role, circuit, config))
    }

    /// Returns the role of this party.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the loaded circuit.
    pub fn circuit(&self) -> &Arc<Circuit> {
        &self.circuit
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns `true` if a previous error ended this session.
    pub fn is_poisoned(&self) -> bool {
        self.state == State::Poisoned
    }

    /// Sets this party's private input.
    #[tracing::instrument(level = "debug", fields(role = %self.role), skip_all, err)]
    pub fn set_input(&mut self, input: impl Into<Input>) -> Result<(), SessionError> {
        let input = input.into();
        self.guard(|this| {
            if this.state != State::Ready {
                return Err(SessionError::State("input must be set before garbling"));
            }

            let size = match this.role {
                Role::Garbler => this.circuit.garbler_input_size(),
                Role::Evaluator => this.circuit.evaluator_input_size(),
            };
            this.input = Some(input.into_bits(size)?);

            Ok(())
        })
    }

    /// Returns the Evaluator's choice bits, from which its OT receiver is
    /// constructed.
    pub fn choices(&mut self) -> Result<&[bool], SessionError> {
        self.guard(|this| {
            this.expect_role(Role::Evaluator, "choices")?;
            this.input_bits().map(|_| ())
        })?;

        self.input_bits()
    }

    /// Garbles the circuit with the Garbler's input.
    #[tracing::instrument(level = "debug", fields(role = %self.role), skip_all, err)]
    pub fn generate_garbling<R: Rng + CryptoRng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<GarbledData, SessionError> {
        self.guard(|this| {
            this.expect_role(Role::Garbler, "generate_garbling")?;
            if this.state != State::Ready {
                return Err(SessionError::State("circuit already garbled"));
            }

            let garbled = garble(this.circuit.clone(), this.input_bits()?, rng)?;
            this.state = State::Prepared;

            tracing::debug!(
                tables = garbled.tables().len(),
                outputs = garbled.decoding().len(),
                "garbled circuit"
            );

            Ok(garbled)
        })
    }

    /// Transfers the Evaluator input labels through oblivious transfer.
    ///
    /// The label pairs are removed from `garbled`, leaving only the data that
    /// is safe to send to the Evaluator. Returns one message per Evaluator
    /// input wire, in wire order.
    #[tracing::instrument(level = "debug", fields(role = %self.role), skip_all, err)]
    pub fn send_evaluator_labels<S: OtSender>(
        &mut self,
        garbled: &mut GarbledData,
        sender: &S,
    ) -> Result<Vec<S::Msg>, SessionError> {
        self.guard(|this| {
            this.expect_role(Role::Garbler, "send_evaluator_labels")?;
            if this.state != State::Prepared {
                return Err(SessionError::State("circuit not garbled"));
            }

            let pairs = garbled.take_evaluator_labels();
            if pairs.len() != this.circuit.evaluator_input_size() {
                return Err(SessionError::LengthMismatch {
                    what: "evaluator label",
                    expected: this.circuit.evaluator_input_size(),
                    actual: pairs.len(),
                });
            }

            let msgs = ot::send_labels(sender, &pairs, this.config.parallel_ot())?;
            this.state = State::Done;
            this.input = None;

            Ok(msgs)
        })
    }

    /// Obtains the labels of the Evaluator's input through oblivious transfer.
    #[tracing::instrument(level = "debug", fields(role = %self.role), skip_all, err)]
    pub fn receive_evaluator_labels<R: OtReceiver>(
        &mut self,
        receiver: &R,
        msgs: &[R::Msg],
    ) -> Result<Vec<Label>, SessionError> {
        self.guard(|this| {
            this.expect_role(Role::Evaluator, "receive_evaluator_labels")?;
            this.input_bits()?;
            if this.state != State::Ready {
                return Err(SessionError::State("labels already received"));
            }

            let expected = this.circuit.evaluator_input_size();
            if receiver.count() != expected {
                return Err(SessionError::LengthMismatch {
                    what: "choice bit",
                    expected,
                    actual: receiver.count(),
                });
            }

            let labels = ot::receive_labels(receiver, msgs, this.config.parallel_ot())?;
            this.state = State::Prepared;

            Ok(labels)
        })
    }

    /// Evaluates the garbled circuit and decodes the output bits.
    ///
    /// `assignment` holds the Garbler's labels followed by the Evaluator's
    /// labels, one per input wire.
    #[tracing::instrument(level = "debug", fields(role = %self.role), skip_all, err)]
    pub fn evaluate_circuit(
        &mut self,
        garbled: &GarbledData,
        assignment: &[Label],
    ) -> Result<Vec<bool>, SessionError> {
        self.guard(|this| {
            this.expect_role(Role::Evaluator, "evaluate_circuit")?;
            if this.state == State::Done {
                return Err(SessionError::State("circuit already evaluated"));
            }

            if this.config.verify_circuit_id() && garbled.circuit().id() != this.circuit.id() {
                return Err(IntegrityError::CircuitMismatch.into());
            }

            let output = evaluate(
                this.circuit.clone(),
                assignment,
                garbled.tables(),
                garbled.decoding(),
            )?;
            this.state = State::Done;
            this.input = None;

            tracing::debug!(outputs = output.len(), "evaluated circuit");

            Ok(output)
        })
    }

    /// Concludes the session, discarding the private input.
    pub fn finish(self) -> Result<(), SessionError> {
        match self.state {
            State::Done => Ok(()),
            State::Poisoned => Err(SessionError::State("session was poisoned")),
            State::Ready | State::Prepared => Err(SessionError::State("session not complete")),
        }
    }

    fn expect_role(&self, expected: Role, operation: &'static str) -> Result<(), SessionError> {
        if self.role != expected {
            return Err(SessionError::Role {
                operation,
                expected,
                actual: self.role,
            });
        }
        Ok(())
    }

    fn input_bits(&self) -> Result<&[bool], SessionError> {
        self.input
            .as_deref()
            .ok_or(SessionError::State("input not set"))
    }

    /// Runs `f`, poisoning the session if it fails.
    fn guard<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        if self.state == State::Poisoned {
            return Err(SessionError::State("session was poisoned"));
        }

        let result = f(self);
        if result.is_err() {
            self.state = State::Poisoned;
            self.input = None;
        }
        result
    }
}
