mod notifier;
mod output;
mod prompt;
