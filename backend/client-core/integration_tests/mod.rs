mod api_client;
mod auth;
mod helpers;
mod list_view;
mod screens;
