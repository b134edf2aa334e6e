// Chat export parsing and training example construction

pub mod builder;
pub mod line;
pub mod persona;

pub use builder::{BuildStats, ExampleBuilder, ExampleMessage, FineTuneExample, Role};
pub use line::{parse_export, parse_line, ChatLine};
pub use persona::{participant_from_prompt, strip_speaker_prefix, system_prompt};
