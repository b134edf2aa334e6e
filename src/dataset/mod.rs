// Training dataset serialization
//
// Examples are stored as JSONL, the chat fine-tuning format:
// {"messages": [{"role": "system", ...}, {"role": "user", ...}, {"role": "assistant", ...}]}

pub mod participants;
pub mod reader;
pub mod writer;

pub use participants::extract_participants;
pub use reader::{parse_jsonl_lenient, read_dataset};
pub use writer::{to_jsonl, write_dataset};
