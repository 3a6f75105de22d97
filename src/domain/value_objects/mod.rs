pub mod command_template;
pub mod resource_path;
