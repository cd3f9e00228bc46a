// Scripted in-memory driver for integration tests
#![allow(dead_code)]

use sqlmapper::{Connection, Cursor, Driver, DriverError, ExecResult, Transaction, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

pub const SQLMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sqlmap>
    <!-- users -->
    <select id="getUser">SELECT id, first_name, last_name, email_verified FROM t WHERE id = #{Id}</select>
    <select id="listUsers">SELECT id, first_name, last_name, email_verified FROM t ORDER BY id</select>
    <select id="countUsers">SELECT count(*) FROM t</select>
    <select id="userNames">SELECT id, first_name FROM t WHERE last_name = #{LastName} AND id &gt; #{Id}</select>
    <insert id="insertStmt">INSERT INTO t(first_name,last_name,email_verified) VALUES(#{FirstName},#{LastName},#{EmailVerified})</insert>
    <update id="verifyUser">UPDATE t SET email_verified = #{EmailVerified} WHERE id = #{Id}</update>
    <delete id="deleteUser">DELETE FROM t WHERE id = #{Id}</delete>
</sqlmap>
"#;

/// Which handle a statement went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Connection,
    Transaction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub scope: Scope,
    pub sql: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin,
    Commit,
    Rollback,
    CursorClosed,
    ConnectionClosed,
}

#[derive(Debug, Default)]
struct Script {
    calls: Vec<Call>,
    events: Vec<Event>,
    result_sets: VecDeque<(Vec<String>, Vec<Vec<Value>>)>,
    exec_results: VecDeque<ExecResult>,
    fail_next: Option<String>,
    fail_cursor_close: bool,
    fail_fetch: bool,
}

/// Records every statement it receives and replays queued results.
///
/// Queries with nothing queued return an empty result set; execs with
/// nothing queued report one affected row.
#[derive(Debug, Clone, Default)]
pub struct MockConnection {
    script: Arc<Mutex<Script>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn push_rows(&self, columns: &[&str], rows: Vec<Vec<Value>>) {
        let columns = columns.iter().map(|c| (*c).to_string()).collect();
        self.script().result_sets.push_back((columns, rows));
    }

    pub fn push_exec(&self, result: ExecResult) {
        self.script().exec_results.push_back(result);
    }

    /// Make the next exec, query or begin fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.script().fail_next = Some(message.to_string());
    }

    pub fn fail_cursor_close(&self) {
        self.script().fail_cursor_close = true;
    }

    /// Once a cursor has handed out its queued rows, the next fetch fails.
    pub fn fail_next_row(&self) {
        self.script().fail_fetch = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    pub fn last_call(&self) -> Call {
        self.script().calls.last().cloned().expect("no statement was executed")
    }

    pub fn events(&self) -> Vec<Event> {
        self.script().events.clone()
    }

    fn take_failure(&self) -> Result<(), DriverError> {
        match self.script().fail_next.take() {
            Some(message) => Err(message.into()),
            None => Ok(()),
        }
    }

    fn record(&self, scope: Scope, sql: &str, params: &[Value]) {
        self.script().calls.push(Call {
            scope,
            sql: sql.to_string(),
            params: params.to_vec(),
        });
    }

    fn run_exec(&self, scope: Scope, sql: &str, params: &[Value]) -> Result<ExecResult, DriverError> {
        self.record(scope, sql, params);
        self.take_failure()?;
        Ok(self
            .script()
            .exec_results
            .pop_front()
            .unwrap_or(ExecResult::new(1, None)))
    }

    fn run_query(&self, scope: Scope, sql: &str, params: &[Value]) -> Result<Box<dyn Cursor + '_>, DriverError> {
        self.record(scope, sql, params);
        self.take_failure()?;
        let mut script = self.script();
        let (columns, rows) = script.result_sets.pop_front().unwrap_or_default();
        Ok(Box::new(MockCursor {
            columns,
            rows: rows.into(),
            fail_close: script.fail_cursor_close,
            fail_fetch: script.fail_fetch,
            script: Arc::clone(&self.script),
        }))
    }
}

impl Driver for MockConnection {
    fn exec(&self, sql: &str, params: &[Value]) -> Result<ExecResult, DriverError> {
        self.run_exec(Scope::Connection, sql, params)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn Cursor + '_>, DriverError> {
        self.run_query(Scope::Connection, sql, params)
    }
}

impl Connection for MockConnection {
    type Transaction = MockTransaction;

    fn begin(&self) -> Result<MockTransaction, DriverError> {
        self.take_failure()?;
        self.script().events.push(Event::Begin);
        Ok(MockTransaction { conn: self.clone() })
    }

    fn close(self) -> Result<(), DriverError> {
        self.script().events.push(Event::ConnectionClosed);
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockTransaction {
    conn: MockConnection,
}

impl Driver for MockTransaction {
    fn exec(&self, sql: &str, params: &[Value]) -> Result<ExecResult, DriverError> {
        self.conn.run_exec(Scope::Transaction, sql, params)
    }

    fn query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn Cursor + '_>, DriverError> {
        self.conn.run_query(Scope::Transaction, sql, params)
    }
}

impl Transaction for MockTransaction {
    fn commit(self) -> Result<(), DriverError> {
        self.conn.take_failure()?;
        self.conn.script().events.push(Event::Commit);
        Ok(())
    }

    fn rollback(self) -> Result<(), DriverError> {
        self.conn.script().events.push(Event::Rollback);
        Ok(())
    }
}

struct MockCursor {
    columns: Vec<String>,
    rows: VecDeque<Vec<Value>>,
    fail_close: bool,
    fail_fetch: bool,
    script: Arc<Mutex<Script>>,
}

impl Cursor for MockCursor {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>, DriverError> {
        match self.rows.pop_front() {
            None if self.fail_fetch => Err("connection reset mid-fetch".into()),
            row => Ok(row),
        }
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.script.lock().unwrap().events.push(Event::CursorClosed);
        if self.fail_close {
            return Err("cursor close failed".into());
        }
        Ok(())
    }
}

/// Column layout of the `t` table used by the user statements.
pub const USER_COLUMNS: [&str; 4] = ["id", "first_name", "last_name", "email_verified"];

pub fn user_row(id: i64, first: &str, last: &str, verified: bool) -> Vec<Value> {
    vec![
        Value::Integer(id),
        Value::Text(first.to_string()),
        Value::Text(last.to_string()),
        Value::Boolean(verified),
    ]
}
