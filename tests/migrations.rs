#[cfg(test)]
mod tests {
    use taskies::db::db::Db;
    use taskies::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            MigrationTestContext { temp_dir }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_automatically(ctx: &mut MigrationTestContext) {
        let db = Db::open(ctx.temp_dir.path().join("taskies.db")).unwrap();

        assert!(get_db_version(&db.conn).unwrap() > 0);
        assert!(!needs_migration(&db.conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let path = ctx.temp_dir.path().join("taskies.db");
        let version = {
            let db = Db::open(&path).unwrap();
            get_db_version(&db.conn).unwrap()
        };

        // Reopening applies nothing new
        let mut db = Db::open(&path).unwrap();
        MigrationManager::new().run_migrations(&mut db.conn).unwrap();
        assert_eq!(get_db_version(&db.conn).unwrap(), version);

        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
        for (i, (version, _, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
        }
    }

    #[test]
    fn test_schema_has_export_tables() {
        let db = Db::open_in_memory().unwrap();
        for table in ["tasks", "workdays", "projects", "categories", "clients", "employers", "attributes", "task_attribute_values"] {
            let count: i64 = db
                .conn
                .query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1", [table], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }
}
