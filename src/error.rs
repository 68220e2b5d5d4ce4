//! Error type shared by both optimizers.

use thiserror::Error;

/// A boxed error raised by a fallible objective function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can stop a run before it produces a [`Report`].
///
/// Configuration errors are reported before the first objective evaluation.
/// Objective errors are never swallowed: the run stops and the failure is
/// returned together with the coordinates that caused it.
///
/// [`Report`]: crate::report::Report
#[derive(Debug, Error)]
pub enum Error {
  /// A bound is empty, inverted or not finite.
  #[error("invalid bound on axis {axis}: expected finite min < max, got [{min}, {max}]")]
  InvalidBound {
    /// Index of the offending axis.
    axis: usize,
    /// Lower end of the bound.
    min: f64,
    /// Upper end of the bound.
    max: f64,
  },

  /// An interval parameter is empty, inverted, not finite or too wide.
  #[error("invalid {name}: expected finite min < max, got [{min}, {max}]")]
  InvalidInterval {
    /// Name of the configuration field.
    name: &'static str,
    /// Lower end of the interval.
    min: f64,
    /// Upper end of the interval.
    max: f64,
  },

  /// A count that must be positive is zero.
  #[error("{name} must be positive")]
  ZeroCount {
    /// Name of the configuration field.
    name: &'static str,
  },

  /// A probability lies outside of `[0, 1]`.
  #[error("{name} must lie within [0, 1], got {value}")]
  InvalidProbability {
    /// Name of the configuration field.
    name: &'static str,
    /// Rejected value.
    value: f64,
  },

  /// A numeric parameter is NaN, negative or otherwise out of its domain.
  #[error("{name} is out of range: {value}")]
  InvalidParameter {
    /// Name of the configuration field.
    name: &'static str,
    /// Rejected value.
    value: f64,
  },

  /// Tournament size is zero or exceeds the population.
  #[error("tournament size {size} must be between 1 and the population size {population}")]
  InvalidTournament {
    /// Requested tournament size.
    size: usize,
    /// Configured population size.
    population: usize,
  },

  /// The objective function failed.
  #[error("objective evaluation failed at ({x}, {y})")]
  Objective {
    /// First coordinate of the evaluated point.
    x: f64,
    /// Second coordinate of the evaluated point.
    y: f64,
    /// Error returned by the objective.
    #[source]
    source: BoxError,
  },
}

/// A `Result` alias with this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_messages_name_the_field() {
    let e = Error::InvalidProbability {
      name: "mutation_rate",
      value: 1.5,
    };
    assert_eq!(e.to_string(), "mutation_rate must lie within [0, 1], got 1.5");
    let e = Error::ZeroCount {
      name: "particle_count",
    };
    assert_eq!(e.to_string(), "particle_count must be positive");
  }

  #[test]
  fn test_objective_error_keeps_source() {
    use std::error::Error as _;
    let e = Error::Objective {
      x: 1.0,
      y: 2.0,
      source: "boom".into(),
    };
    assert_eq!(e.source().map(ToString::to_string), Some("boom".into()));
  }
}
