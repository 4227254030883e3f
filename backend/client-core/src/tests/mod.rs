mod collection_view;
mod format;
mod guard;
mod pagination;
mod session;
mod support;
