use taskies::db::db::Db;
use test_context::TestContext;

/// Seeded in-memory task log.
///
/// | task | workday    | project  | client | category    | active | attributes           |
/// |------|------------|----------|--------|-------------|--------|----------------------|
/// | 1    | 2024-03-01 | Website  | Globex | Development | yes    | Ticket=T-100         |
/// | 2    | 2024-03-01 | Internal | -      | Meetings    | yes    | Remote=1             |
/// | 3    | 2024-03-02 | Website  | Globex | Development | yes    | Ticket=T-101 (inactive) |
/// | 4    | 2024-03-01 | Website  | Globex | Development | no     |                      |
/// | 5    | 2024-04-01 | Internal | -      | Development | yes    |                      |
pub struct TaskLogContext {
    pub db: Db,
}

impl TestContext for TaskLogContext {
    fn setup() -> Self {
        let db = Db::open_in_memory().unwrap();
        db.conn
            .execute_batch(
                "INSERT INTO employers (employer_id, name) VALUES (1, 'Acme');
                 INSERT INTO clients (client_id, name, employer_id) VALUES (1, 'Globex', 1);
                 INSERT INTO projects (project_id, name, display_name, employer_id, client_id) VALUES (1, 'website', 'Website', 1, 1);
                 INSERT INTO projects (project_id, name, display_name, employer_id, client_id) VALUES (2, 'internal', 'Internal', 1, NULL);
                 INSERT INTO categories (category_id, name) VALUES (1, 'Development');
                 INSERT INTO categories (category_id, name) VALUES (2, 'Meetings');
                 INSERT INTO workdays (workday_id, date) VALUES (1, '2024-03-01');
                 INSERT INTO workdays (workday_id, date) VALUES (2, '2024-03-02');
                 INSERT INTO workdays (workday_id, date) VALUES (3, '2024-04-01');
                 INSERT INTO tasks (task_id, billable, unique_identifier, hours, minutes, description, project_id, category_id, workday_id, is_active)
                     VALUES (1, 1, 'WEB-1', 1, 5, 'Fix header' || char(10) || 'and footer', 1, 1, 1, 1);
                 INSERT INTO tasks (task_id, billable, unique_identifier, hours, minutes, description, project_id, category_id, workday_id, is_active)
                     VALUES (2, 0, NULL, 0, 30, 'Standup', 2, 2, 1, 1);
                 INSERT INTO tasks (task_id, billable, unique_identifier, hours, minutes, description, project_id, category_id, workday_id, is_active)
                     VALUES (3, 1, 'WEB-2', 2, 0, 'Deploy', 1, 1, 2, 1);
                 INSERT INTO tasks (task_id, billable, unique_identifier, hours, minutes, description, project_id, category_id, workday_id, is_active)
                     VALUES (4, 1, 'WEB-0', 3, 0, 'Deleted task', 1, 1, 1, 0);
                 INSERT INTO tasks (task_id, billable, unique_identifier, hours, minutes, description, project_id, category_id, workday_id, is_active)
                     VALUES (5, 0, NULL, 4, 15, 'April work', 2, 1, 3, 1);
                 INSERT INTO attributes (attribute_id, name) VALUES (1, 'Ticket');
                 INSERT INTO attributes (attribute_id, name) VALUES (2, 'Remote');
                 INSERT INTO task_attribute_values (text_value, boolean_value, numeric_value, task_id, attribute_id, is_active)
                     VALUES ('T-100', NULL, NULL, 1, 1, 1);
                 INSERT INTO task_attribute_values (text_value, boolean_value, numeric_value, task_id, attribute_id, is_active)
                     VALUES (NULL, 1, NULL, 2, 2, 1);
                 INSERT INTO task_attribute_values (text_value, boolean_value, numeric_value, task_id, attribute_id, is_active)
                     VALUES ('T-101', NULL, NULL, 3, 1, 0);",
            )
            .unwrap();
        TaskLogContext { db }
    }
}

#[allow(dead_code)]
pub fn date(value: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}
