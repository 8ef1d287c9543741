//! End-to-end tests driving the plugin the way a chat host does.

mod commands_test;
mod helpers;
mod subscription_test;
