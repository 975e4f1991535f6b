pub mod command;
pub mod custom;
pub mod error;
pub mod external;
pub mod format;
pub mod fortune;
pub mod lookup;
pub mod markup;
pub mod pipeline;
pub mod preprocess;
pub mod random;
pub mod speech;
pub mod state;
pub mod types;
pub mod wordnet;
