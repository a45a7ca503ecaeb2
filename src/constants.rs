//! Central constants for the bundle-ops application

/// Names of the long-lived workflow branches
pub mod branches {
    /// Official release line; changes only through merges from integration or operate
    pub const MASTER_BRANCH: &str = "master";

    /// Where feature work is combined and validated before reaching master
    pub const INTEGRATION_BRANCH: &str = "integration";

    /// Runs production workloads; receives releases from master and hot fixes
    pub const OPERATE_BRANCH: &str = "operate";
}

/// Default values for Git operations
pub mod git {
    /// Remote every working copy pushes to and pulls from
    pub const REMOTE_NAME: &str = "origin";

    /// Prefix of the marker line opening each commit in `git log` output
    pub const LOG_COMMIT_MARKER: &str = "commit ";
}

/// Default values for GitHub operations
pub mod github {
    /// Remote roots starting with this prefix are resolved to the GitHub API backend
    pub const WEB_BASE: &str = "https://github.com/";

    /// Key of the GitHub token in the secret store
    pub const TOKEN_SECRET_KEY: &str = "github_token";

    /// Environment variable consulted when no secrets file is configured
    pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";
}

/// Content of a newly created project
pub mod project {
    pub const README_FILE: &str = "README.md";
    pub const GITIGNORE_FILE: &str = ".gitignore";
    pub const INITIAL_COMMIT_MSG: &str = "Initial commit";

    /// Work branch created in every new repository unless another is requested
    pub const DEFAULT_WORK_BRANCH: &str = "integration";

    pub const GITIGNORE_LINES: &[&str] = &[
        "# Python build",
        "__pycache__/",
        "*.egg-info/",
        "",
        "",
        "# Used in documentation",
        "build/",
        "*.~docx",
        "*.~xlsx",
        "*.~vsdx",
        "*.~pptx",
        "",
        "",
        "# Used in operator tools",
        "*.ipynb_checkpoints/",
        "",
        "# Used in test scenarios",
        "ACTUALS@*/",
        "RUN_NOTES/",
        "",
        "",
    ];
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "bundle.yaml";
}

/// Names used in status and log reports
pub mod report {
    pub const REPO_NAME_COL: &str = "Repo";
    pub const LOCAL_OR_REMOTE_COL: &str = "Local/Remote";
    pub const CURRENT_BRANCH_COL: &str = "Current Branch";
    pub const NB_UNTRACKED_FILES_COL: &str = "# Untracked files";
    pub const NB_MODIFIED_FILES_COL: &str = "# Modified files";
    pub const NB_DELETED_FILES_COL: &str = "# Deleted files";
    pub const LAST_COMMIT_COL: &str = "Last commit";
    pub const LAST_COMMIT_TIMESTAMP_COL: &str = "Last commit timestamp";
    pub const LAST_COMMIT_HASH_COL: &str = "Last commit hash";

    pub const COMMIT_NB_COL: &str = "Commit #";
    pub const COMMIT_DATE_COL: &str = "Date";
    pub const COMMIT_SUMMARY_COL: &str = "Summary";
    pub const COMMIT_FILE_NB_COL: &str = "File #";
    pub const COMMIT_FILE_COL: &str = "Commited Files";
    pub const COMMIT_HASH_COL: &str = "Commit";
    pub const COMMIT_AUTHOR_COL: &str = "Author";

    /// Name of the stats table
    pub const STATS_TABLE: &str = "Report";

    /// Report folder layout under the publications root
    pub const OPERATOR_REPORTS: &str = "Operator Reports";
    pub const DEV_OPS_REPORTS_FOLDER: &str = "DevOps";
    pub const REPORT_REPO_STATS: &str = "Repo Stats";

    /// Longest table name the spreadsheet-based report consumers accept
    pub const MAX_TABLE_NAME_LEN: usize = 31;

    /// Replacement for non-deterministic values when masking is requested
    pub const MASKED_MSG: &str = "< MASKED > ";
}
