// Resume analysis: text extraction, skill detection, persistence and job matching.
// Handlers only orchestrate; scoring lives in `matcher`, SQL lives in `store`.

pub mod extract;
pub mod handlers;
pub mod matcher;
pub mod pipeline;
pub mod skills;
pub mod store;
pub mod vocabulary;
