//! Various configuration used in the protocol

use derive_builder::Builder;

/// Role in 2PC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Encrypts the circuit and its own input.
    Garbler,
    /// Decrypts the circuit gate by gate to obtain the output.
    Evaluator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Garbler => f.write_str("Garbler"),
            Role::Evaluator => f.write_str("Evaluator"),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Builder)]
pub struct SessionConfig {
    /// Whether to run the per-wire oblivious transfers on the rayon thread pool.
    #[builder(default = "true")]
    parallel_ot: bool,
    /// Whether the Evaluator checks that garbled data was produced for the
    /// circuit it loaded.
    #[builder(default = "true")]
    verify_circuit_id: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            parallel_ot: true,
            verify_circuit_id: true,
        }
    }
}

impl SessionConfig {
    /// Creates a new builder for SessionConfig.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Whether to run the per-wire oblivious transfers in parallel.
    pub fn parallel_ot(&self) -> bool {
        self.parallel_ot
    }

    /// Whether the Evaluator checks the circuit of received garbled data.
    pub fn verify_circuit_id(&self) -> bool {
        self.verify_circuit_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SessionConfig::builder().build().unwrap();
        assert!(config.parallel_ot());
        assert!(config.verify_circuit_id());

        let config = SessionConfig::builder().parallel_ot(false).build().unwrap();
        assert!(!config.parallel_ot());
    }
}
