//! Detection Adapters.
//!
//! Implementations of the DeepfakeDetector port.
//!
//! ## Available Adapters
//!
//! - `SightengineDetector` - Sightengine image and video scoring
//! - `ResembleDetector` - Resemble AI synthetic voice detection
//! - `DemoDetector` - Randomized scores, no network
//! - `FallbackDetector` - Routes by kind and degrades to demo scores
//! - `MockDetector` - Configurable mock for testing

mod demo_detector;
mod fallback_detector;
mod mock_detector;
mod resemble;
mod sightengine;
mod vendor_status;

pub use demo_detector::DemoDetector;
pub use fallback_detector::{FallbackDetector, DEFAULT_VENDOR_DEADLINE, NOT_CONFIGURED_REASON};
pub use mock_detector::{fixed_scores, MockDetector, MockError, MockResponse};
pub use resemble::{ResembleConfig, ResembleDetector};
pub use sightengine::{SightengineConfig, SightengineDetector};
