// Serializable views of the recorded graphs.

pub mod dto;
