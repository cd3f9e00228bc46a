use crate::core::Value;

/// Substitute bound parameters into `sql` for log output only.
///
/// `?` markers take parameters in order, `$N` takes parameter N. Markers
/// without a matching parameter are left as they are. The result is never
/// executed.
#[must_use]
pub fn render_sql(sql: &str, params: &[Value]) -> String {
    let mut result = String::with_capacity(sql.len() + params.len() * 8);
    let mut next = 0;
    let mut chars = sql.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '?' => {
                match params.get(next) {
                    Some(value) => result.push_str(&value.to_sql_literal()),
                    None => result.push('?'),
                }
                next += 1;
            }
            '$' => {
                let start = pos + 1;
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + 1;
                    chars.next();
                }

                let index = sql[start..end].parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                match index.and_then(|i| params.get(i)) {
                    Some(value) => result.push_str(&value.to_sql_literal()),
                    None => result.push_str(&sql[pos..end]),
                }
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_question_marks() {
        let sql = "SELECT * FROM users WHERE id = ? AND name = ?";
        let params = vec![Value::Integer(42), Value::Text("Alice".to_string())];

        let result = render_sql(sql, &params);
        assert_eq!(result, "SELECT * FROM users WHERE id = 42 AND name = 'Alice'");
    }

    #[test]
    fn test_render_dollar_markers() {
        let sql = "UPDATE users SET email = $1 WHERE id = $2";
        let params = vec![Value::Null, Value::Integer(42)];

        let result = render_sql(sql, &params);
        assert_eq!(result, "UPDATE users SET email = NULL WHERE id = 42");
    }

    #[test]
    fn test_render_escapes_quotes() {
        let result = render_sql(
            "INSERT INTO users (name) VALUES (?)",
            &[Value::Text("O'Brien".to_string())],
        );
        assert_eq!(result, "INSERT INTO users (name) VALUES ('O''Brien')");
    }

    #[test]
    fn test_render_missing_params_left_in_place() {
        assert_eq!(render_sql("a = ? AND b = ?", &[Value::Integer(1)]), "a = 1 AND b = ?");
        assert_eq!(render_sql("a = $3 AND b = $", &[Value::Integer(1)]), "a = $3 AND b = $");
    }
}
