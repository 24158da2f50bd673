use live_events::{RowFilter, TargetRelation};

/// A statement together with the values bound to its placeholders.
#[derive(Debug, PartialEq, Eq)]
pub struct ScopedQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// Renders an identifier as a quoted SQL identifier.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// The row as a JSON object, with `text_columns` replaced by their text form.
fn row_json(text_columns: &[String]) -> String {
    if text_columns.is_empty() {
        return "to_jsonb(t)".to_string();
    }

    let overrides = text_columns
        .iter()
        .map(|column| format!("{}, t.{}::text", quote_literal(column), quote_ident(column)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("to_jsonb(t) || jsonb_build_object({overrides})")
}

/// Filter values never become part of the SQL text, they are returned as
/// parameters.
pub fn render_scoped_select(relation: &TargetRelation, filter: &RowFilter) -> ScopedQuery {
    let schema = quote_ident(&relation.schema);
    let table = quote_ident(&relation.name);
    let row = row_json(&relation.text_columns);

    match filter {
        RowFilter::PrimaryKeyEquals { column, value } => {
            let column = quote_ident(column);
            // Type names come from `format_type()` of the catalog and are valid SQL as is
            let pk_type = &relation.primary_key_sql_type;

            let sql = indoc::formatdoc!(
                r#"
                SELECT {row}
                FROM {schema}.{table} AS t
                WHERE t.{column} = CAST($1 AS {pk_type})
                LIMIT 1
                "#
            );

            ScopedQuery {
                sql,
                params: vec![value.as_str().to_string()],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use live_events::SubjectId;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn postings() -> TargetRelation {
        TargetRelation {
            schema: "scaledger_public".to_string(),
            name: "postings".to_string(),
            primary_key: "id".to_string(),
            primary_key_sql_type: "bigint".to_string(),
            text_columns: vec![],
        }
    }

    fn by_subject(subject: &str) -> RowFilter {
        RowFilter::PrimaryKeyEquals {
            column: "id".to_string(),
            value: SubjectId::new(subject),
        }
    }

    #[test]
    fn test_primary_key_select() {
        let query = render_scoped_select(&postings(), &by_subject("42"));

        assert_eq!(
            indoc::indoc!(
                r#"
                SELECT to_jsonb(t)
                FROM "scaledger_public"."postings" AS t
                WHERE t."id" = CAST($1 AS bigint)
                LIMIT 1
                "#
            ),
            query.sql
        );
        assert_eq!(vec!["42".to_string()], query.params);
    }

    #[test]
    fn test_text_columns_are_read_as_text() {
        let relation = TargetRelation {
            text_columns: vec!["balance".to_string(), "fx'rate".to_string()],
            ..postings()
        };

        let query = render_scoped_select(&relation, &by_subject("42"));

        assert_eq!(
            indoc::indoc!(
                r#"
                SELECT to_jsonb(t) || jsonb_build_object('balance', t."balance"::text, 'fx''rate', t."fx'rate"::text)
                FROM "scaledger_public"."postings" AS t
                WHERE t."id" = CAST($1 AS bigint)
                LIMIT 1
                "#
            ),
            query.sql
        );
        assert_eq!(vec!["42".to_string()], query.params);
    }

    #[rstest]
    #[case("1; DROP TABLE scaledger_public.postings; --")]
    #[case("1' OR '1'='1")]
    #[case("$1")]
    fn test_subject_does_not_change_query_shape(#[case] subject: &str) {
        let baseline = render_scoped_select(&postings(), &by_subject("1"));
        let query = render_scoped_select(&postings(), &by_subject(subject));

        assert_eq!(baseline.sql, query.sql);
        assert_eq!(vec![subject.to_string()], query.params);
    }

    #[rstest]
    #[case("postings", "\"postings\"")]
    #[case("weird\"name", "\"weird\"\"name\"")]
    fn test_quote_ident(#[case] ident: &str, #[case] expected: &str) {
        assert_eq!(expected, quote_ident(ident));
    }
}
