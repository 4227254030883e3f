// End-to-end command tests against a wiremock transactions API

mod commands;
mod helpers;
