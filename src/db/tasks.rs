use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

const INSERT_TASK: &str = "INSERT INTO tasks (title, description, priority, status, due_date) VALUES (?1, ?2, ?3, 'pending', ?4)";
const SELECT_PENDING: &str =
    "SELECT id, title, description, priority, status, due_date, created_at, completed_at FROM tasks WHERE status = 'pending' ORDER BY priority DESC, id";
const SELECT_ALL: &str = "SELECT id, title, description, priority, status, due_date, created_at, completed_at FROM tasks ORDER BY id";
const COMPLETE_TASK: &str = "UPDATE tasks SET status = 'done', completed_at = ?1 WHERE id = ?2 AND status = 'pending'";

// A work item tracked alongside activity. Only referenced by the suggest
// command and status display; the monitor and scheduler never touch tasks.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub status: String,
    pub due_date: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
}

pub struct Tasks {
    conn: Connection,
}

impl Tasks {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Tasks { conn: db.conn })
    }

    pub fn insert(&self, task: &Task) -> Result<i64> {
        self.conn.execute(
            INSERT_TASK,
            params![task.title, task.description, task.priority, task.due_date],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn fetch_pending(&self) -> Result<Vec<Task>> {
        self.fetch_with(SELECT_PENDING)
    }

    pub fn fetch_all(&self) -> Result<Vec<Task>> {
        self.fetch_with(SELECT_ALL)
    }

    pub fn complete(&self, id: i64, completed_at: NaiveDateTime) -> Result<()> {
        let affected = self.conn.execute(COMPLETE_TASK, params![completed_at, id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFoundWithId(id)));
        }
        Ok(())
    }

    fn fetch_with(&self, query: &str) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(query)?;
        let task_iter = stmt.query_map([], |row| {
            Ok(Task {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                description: row.get(2)?,
                priority: row.get(3)?,
                status: row.get(4)?,
                due_date: row.get(5)?,
                created_at: row.get(6)?,
                completed_at: row.get(7)?,
            })
        })?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }
}
