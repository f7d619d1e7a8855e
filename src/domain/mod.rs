//! Domain layer for the Unimatch deck engine.
//!
//! This module contains the core domain types, independent of how candidates
//! are loaded, animated or rendered.
//!
//! # Organization
//!
//! - [`candidate`]: Candidate model and its classification tags
//! - [`criteria`]: Quiz answers, filter criteria and user profile
//! - [`verdict`]: Decision outcomes and swipe directions
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use unimatch::domain::{Candidate, Region, Topic, Verdict, SwipeDirection};
//!
//! let uni = Candidate::new("0", "Università di Bologna", "Bologna", Region::North)
//!     .with_topic(Topic::Humanities);
//! assert_eq!(Verdict::Like.direction(), SwipeDirection::Right);
//! assert!(uni.has_topic(Topic::Humanities));
//! ```

pub mod candidate;
pub mod criteria;
pub mod error;
pub mod verdict;

pub use candidate::{Candidate, CandidateId, CitySize, Region, Topic};
pub use criteria::{AnswerValue, FilterCriteria, QuizAnswers, Selection, UserProfile};
pub use error::{DeckRejection, ExportError, Result, UnimatchError};
pub use verdict::{SwipeDirection, Verdict};
