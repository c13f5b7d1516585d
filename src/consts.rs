pub mod table_const {
    pub const USER_TABLE: &str = "users";
    pub const PROJECT_TABLE: &str = "projects";
    pub const PROJECT_USER_TABLE: &str = "project_users";
    pub const INVITATION_TABLE: &str = "invitations";
    pub const ERROR_EVENT_TABLE: &str = "error_events";
    pub const SESSION_TABLE: &str = "sessions";
    pub const PASSWORD_RESET_TABLE: &str = "password_resets";
}
