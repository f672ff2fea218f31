//! Scoring heuristic for room layouts.
//!
//! A layout is scored from three independent components:
//!
//! 1. **Adjacency** ([`adjacency`]) - priority-weighted share of declared "shares a wall
//!    with" preferences the layout satisfies.
//! 2. **Compactness** ([`compactness`]) - bonus for keeping the bounding box of all placed
//!    rooms small relative to their total area.
//! 3. **Time** - bonus proportional to the share of the time limit still left.
//!
//! [`layout_evaluator::LayoutEvaluator`] combines them into an efficiency percentage, a
//! star rating and feedback messages. It implements
//! [`LayoutScorer`](roomcraft_engine::LayoutScorer), so a challenge session can run it on
//! submit and on timeout.
//!
//! All constants of the heuristic live in [`policy::ScoringPolicy`].
//!
//! # Example
//!
//! ```rust
//! use roomcraft_engine::{ChallengeSession, GridPosition, builtin_levels};
//! use roomcraft_evaluator::layout_evaluator::LayoutEvaluator;
//!
//! let level = builtin_levels().remove(0);
//! let mut session = ChallengeSession::new(level, Box::new(LayoutEvaluator::default()));
//! session.place(&"living".into(), GridPosition::new(0, 0))?;
//! session.place(&"kitchen".into(), GridPosition::new(3, 0))?;
//! session.place(&"bathroom".into(), GridPosition::new(0, 2))?;
//!
//! let result = session.submit()?;
//! assert!(result.passed());
//! # Ok::<(), roomcraft_engine::ChallengeError>(())
//! ```

pub mod adjacency;
pub mod compactness;
pub mod layout_evaluator;
pub mod policy;
