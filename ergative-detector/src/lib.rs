//! Rule-based detection of volitional and non-volitional case marking in
//! dependency-parsed Urdu.
//!
//! Classification runs in two passes over a [`Sentence`]: a scan for the
//! ergative (`نے`) and instrumental (`سے`) postpositions, then a structural
//! check over the dependency tree that confirms the marker's reading. The
//! result is always one of [`CaseLabel::Vol`], [`CaseLabel::Nvol`] or
//! [`CaseLabel::Other`].
//!
//! ```
//! use ergative_detector::{CaseLabel, ErgativeDetector, Sentence, Token};
//!
//! let sentence = Sentence::new(
//!     "علی نے کھانا کھایا",
//!     vec![
//!         Token::new(1, "علی", "PROPN", "Case=Acc|Gender=Masc|Number=Sing", 4, "nsubj"),
//!         Token::new(2, "نے", "ADP", "AdpType=Post", 1, "case"),
//!         Token::new(3, "کھانا", "NOUN", "Case=Nom|Gender=Masc|Number=Sing", 4, "obj"),
//!         Token::new(4, "کھایا", "VERB", "Aspect=Perf|Gender=Masc|Number=Sing", 0, "root"),
//!     ],
//! );
//!
//! let detector = ErgativeDetector::new();
//! assert_eq!(detector.detect_case(&sentence).unwrap(), CaseLabel::Vol);
//! ```

pub mod classifier;
pub mod error;
pub mod features;
pub mod markers;
pub mod patterns;
pub mod token;
pub mod tree;

pub use classifier::{CaseClassifier, CaseLabel, ErgativeDetector, ParseCaseLabelError};
pub use error::{DetectError, FeatureFormatError, MalformedTreeError};
pub use features::{FeatureMap, get_features};
pub use markers::{Marker, MarkerForms, NVOL_MARKER, VOL_MARKER, scan_markers};
pub use patterns::{absolutive_pattern, check_pattern, ergative_pattern};
pub use token::{Sentence, Token};
pub use tree::ChildIndex;
