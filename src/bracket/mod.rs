//! Bracket construction and winner propagation
//!
//! Entrants are paired for the first round, the remaining rounds are built
//! on top by joining consecutive matches, and bye winners are pushed up the
//! tree before the build returns.

pub mod builder;
pub mod pairing;
pub mod propagation;
pub mod schedule;
pub mod score;

pub use builder::{build_bracket, validate_entrants};
pub use pairing::{pair_entrants, Pairing};
pub use propagation::{
    advance_walkover, auto_advance_byes, propagate_winner, propagate_with_policy,
    PropagationPolicy,
};
pub use schedule::{parse_time, schedule_first_round, set_match_time};
pub use score::Score;
