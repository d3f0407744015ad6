pub(crate) mod confirm;
pub(crate) mod loading;
pub(crate) mod modal;
pub(crate) mod text;
pub(crate) mod toast;
