pub fn render_schema(vector_dim: u32) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded.replace("<VECTOR_DIM>", &vector_dim.to_string())
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_users.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_users.sql")),
				"tables/002_notes.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_notes.sql")),
				"tables/003_embeddings.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_embeddings.sql")),
				"tables/004_conversations.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_conversations.sql")),
				"tables/005_messages.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_messages.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_all_tables_with_vector_dim() {
		let sql = render_schema(1_536);

		assert!(sql.contains("vector(1536)"));
		assert!(!sql.contains("<VECTOR_DIM>"));
		assert!(!sql.contains("\\ir "));

		for table in ["users", "notes", "embeddings", "conversations", "messages"] {
			assert!(
				sql.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")),
				"missing table {table}",
			);
		}
	}
}
