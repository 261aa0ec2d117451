//! Statement classifier.
//!
//! Maps a raw SQL string to a coarse syntax category that only selects a
//! report shape; it never affects whether or how the statement executes.
//!
//! Classification runs in two stages: a two-state scan normalizes the
//! statement (single-quoted literal content is dropped so it can never
//! influence the result, whitespace runs collapse to one space, the rest
//! is upper-cased), then the normalized text is matched against an
//! ordered prefix rule list with two secondary containment checks
//! (`INSERT … SELECT` and `SHOW CREATE`).

/// Coarse classification of a SQL statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxCategory {
    AlterTable,
    AlterUser,
    AnalyzeTable,
    CacheIndex,
    Call,
    Change,
    CheckSum,
    Commit,
    CreateOrDropIndex,
    CreateOrRenameOrDropDatabase,
    CreateOrDropTable,
    CreateOrRenameOrDropUser,
    CreateOrDropView,
    Delete,
    Do,
    Flush,
    Grant,
    Insert,
    InsertWithSelect,
    InstallPlugin,
    Kill,
    LoadIndexIntoCache,
    OptimizeTable,
    RenameTable,
    RepairTable,
    Replace,
    Reset,
    Revoke,
    Select,
    Set,
    Show,
    ShowCreate,
    StartOrStopReplica,
    Truncate,
    UninstallPlugin,
    Update,
    Unknown,
}

/// Ordered prefix rules. Overlapping prefixes within a keyword family
/// (CREATE INDEX / CREATE TABLE / CREATE VIEW / …) are mutually
/// exclusive, so only relative order within a family matters.
const PREFIX_RULES: &[(&str, SyntaxCategory)] = &[
    ("ALTER TABLE", SyntaxCategory::AlterTable),
    ("ALTER USER", SyntaxCategory::AlterUser),
    ("ANALYZE TABLE", SyntaxCategory::AnalyzeTable),
    ("CACHE INDEX", SyntaxCategory::CacheIndex),
    ("CALL", SyntaxCategory::Call),
    ("CHANGE", SyntaxCategory::Change),
    ("CHECKSUM", SyntaxCategory::CheckSum),
    ("COMMIT", SyntaxCategory::Commit),
    ("CREATE INDEX", SyntaxCategory::CreateOrDropIndex),
    ("DROP INDEX", SyntaxCategory::CreateOrDropIndex),
    ("CREATE DATABASE", SyntaxCategory::CreateOrRenameOrDropDatabase),
    ("RENAME DATABASE", SyntaxCategory::CreateOrRenameOrDropDatabase),
    ("DROP DATABASE", SyntaxCategory::CreateOrRenameOrDropDatabase),
    ("CREATE TABLE", SyntaxCategory::CreateOrDropTable),
    ("DROP TABLE", SyntaxCategory::CreateOrDropTable),
    ("CREATE USER", SyntaxCategory::CreateOrRenameOrDropUser),
    ("RENAME USER", SyntaxCategory::CreateOrRenameOrDropUser),
    ("DROP USER", SyntaxCategory::CreateOrRenameOrDropUser),
    ("CREATE VIEW", SyntaxCategory::CreateOrDropView),
    ("DROP VIEW", SyntaxCategory::CreateOrDropView),
    ("DELETE", SyntaxCategory::Delete),
    ("DO", SyntaxCategory::Do),
    ("FLUSH", SyntaxCategory::Flush),
    ("GRANT", SyntaxCategory::Grant),
    ("INSERT", SyntaxCategory::Insert),
    ("INSTALL PLUGIN", SyntaxCategory::InstallPlugin),
    ("KILL", SyntaxCategory::Kill),
    ("LOAD INDEX INTO CACHE", SyntaxCategory::LoadIndexIntoCache),
    ("OPTIMIZE TABLE", SyntaxCategory::OptimizeTable),
    ("RENAME TABLE", SyntaxCategory::RenameTable),
    ("REPAIR TABLE", SyntaxCategory::RepairTable),
    ("REPLACE", SyntaxCategory::Replace),
    ("RESET", SyntaxCategory::Reset),
    ("REVOKE", SyntaxCategory::Revoke),
    ("SELECT", SyntaxCategory::Select),
    ("SET", SyntaxCategory::Set),
    ("SHOW", SyntaxCategory::Show),
    ("START REPLICA", SyntaxCategory::StartOrStopReplica),
    ("STOP REPLICA", SyntaxCategory::StartOrStopReplica),
    ("TRUNCATE", SyntaxCategory::Truncate),
    ("UNINSTALL PLUGIN", SyntaxCategory::UninstallPlugin),
    ("UPDATE", SyntaxCategory::Update),
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InLiteral,
}

impl SyntaxCategory {
    /// Classify a statement. Never fails; anything unmatched (empty
    /// input included) yields `Unknown`.
    pub fn classify(sql: &str) -> SyntaxCategory {
        let normalized = normalize(sql);
        for (prefix, category) in PREFIX_RULES {
            if !normalized.starts_with(prefix) {
                continue;
            }
            return match *category {
                SyntaxCategory::Insert if normalized.contains("SELECT") => {
                    SyntaxCategory::InsertWithSelect
                }
                SyntaxCategory::Show if normalized.contains("CREATE") => {
                    SyntaxCategory::ShowCreate
                }
                other => other,
            };
        }
        SyntaxCategory::Unknown
    }
}

/// Normalize a statement for prefix matching: drop single-quoted
/// literal content, collapse whitespace runs to one space, upper-case
/// the rest.
fn normalize(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut state = ScanState::Normal;
    let mut in_space_run = false;
    for c in sql.chars() {
        match state {
            ScanState::InLiteral => {
                if c == '\'' {
                    state = ScanState::Normal;
                }
            }
            ScanState::Normal => {
                if c == '\'' {
                    state = ScanState::InLiteral;
                } else if c.is_ascii_whitespace() {
                    if !in_space_run {
                        out.push(' ');
                        in_space_run = true;
                    }
                } else {
                    out.push(c.to_ascii_uppercase());
                    in_space_run = false;
                }
            }
        }
    }
    out
}
