pub(crate) mod execution;
pub(crate) mod update;
