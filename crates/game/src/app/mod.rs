pub(crate) mod adventure;
pub(crate) mod bootstrap;
pub(crate) mod pause;
