mod apply;
mod config;
mod context;
mod exif_reader;
mod fixer;
mod planner;
mod remover;
mod sanitize;
mod template;
mod walk;

#[cfg(test)]
mod test_support;

pub use apply::{apply_rename_plan, ApplyResult};
pub use config::{app_paths, load_config, save_config, AppConfig, AppPaths};
pub use context::ImageContext;
pub use exif_reader::{read_exif_fields, ExifFields};
pub use fixer::{FilenameFixer, RewriteRule};
pub use planner::{generate_rename_plan, RenameCandidate, RenameOptions, RenamePlan, RenameStats};
pub use remover::{
    apply_removal_plan, collect_candidate_names, generate_removal_plan, RemovalOptions,
    RemovalPlan, RemovalResult, RemovalStats,
};
pub use template::{
    parse_template, render_template, validate_template, TemplateError, TemplatePart,
    DEFAULT_TEMPLATE,
};
