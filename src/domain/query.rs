//! Backend-neutral description of a read query.
//!
//! A [`SelectQuery`] captures the capabilities the listing page needs from the
//! hosted backend: column projection, embedded (joined) resources, one
//! full-text predicate and ordering. Adapters translate it to their own wire
//! format; [`SelectQuery::to_params`] produces the PostgREST form.

use serde::{Deserialize, Serialize};

/// How the backend should parse the text-search query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSearchType {
    /// Passed to `to_tsquery` as is.
    #[default]
    Raw,
    Plain,
    Phrase,
    Websearch,
}

impl TextSearchType {
    fn operator_prefix(&self) -> &'static str {
        match self {
            TextSearchType::Raw => "",
            TextSearchType::Plain => "pl",
            TextSearchType::Phrase => "ph",
            TextSearchType::Websearch => "w",
        }
    }
}

impl std::str::FromStr for TextSearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(TextSearchType::Raw),
            "plain" => Ok(TextSearchType::Plain),
            "phrase" => Ok(TextSearchType::Phrase),
            "websearch" => Ok(TextSearchType::Websearch),
            other => Err(format!(
                "unknown text search type '{}' (expected raw, plain, phrase or websearch)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSearch {
    pub column: String,
    pub query: String,
    pub search_type: TextSearchType,
    /// Text search configuration, e.g. `english`.
    pub config: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub alias: String,
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub embeds: Vec<Embed>,
    pub text_search: Option<TextSearch>,
    pub order: Vec<Ordering>,
}

impl SelectQuery {
    pub fn from_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            embeds: Vec::new(),
            text_search: None,
            order: Vec::new(),
        }
    }

    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Embeds a related table under `alias`, e.g. `company:companies(id, name)`.
    pub fn embed<I, S>(mut self, alias: impl Into<String>, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.embeds.push(Embed {
            alias: alias.into(),
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Sets the full-text predicate. A query holds at most one; setting it again replaces it.
    pub fn text_search(
        mut self,
        column: impl Into<String>,
        query: impl Into<String>,
        search_type: TextSearchType,
        config: Option<String>,
    ) -> Self {
        self.text_search = Some(TextSearch {
            column: column.into(),
            query: query.into(),
            search_type,
            config,
        });
        self
    }

    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order.push(Ordering {
            column: column.into(),
            ascending,
        });
        self
    }

    /// The `select` parameter value.
    pub fn select_clause(&self) -> String {
        let mut parts: Vec<String> = self.columns.clone();
        for embed in &self.embeds {
            parts.push(format!("{}:{}({})", embed.alias, embed.table, embed.columns.join(",")));
        }
        if parts.is_empty() {
            "*".to_string()
        } else {
            parts.join(",")
        }
    }

    /// Renders the query as PostgREST URL parameters (not yet percent-encoded).
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select_clause())];

        if let Some(fts) = &self.text_search {
            let config = fts
                .config
                .as_deref()
                .map(|c| format!("({})", c))
                .unwrap_or_default();
            params.push((
                fts.column.clone(),
                format!("{}fts{}.{}", fts.search_type.operator_prefix(), config, fts.query),
            ));
        }

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_clause_with_embed() {
        let query = SelectQuery::from_table("jobs")
            .select(["id", "title"])
            .embed("company", "companies", ["id", "name"]);

        assert_eq!(query.select_clause(), "id,title,company:companies(id,name)");
    }

    #[test]
    fn test_params_without_text_search() {
        let params = SelectQuery::from_table("countries")
            .select(["id", "name"])
            .order("name", true)
            .to_params();

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "id,name".to_string()),
                ("order".to_string(), "name.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_search_operator_variants() {
        let render = |search_type, config: Option<&str>| {
            SelectQuery::from_table("jobs")
                .text_search("fts", "rust & remote", search_type, config.map(str::to_string))
                .to_params()
                .into_iter()
                .find(|(k, _)| k == "fts")
                .map(|(_, v)| v)
                .unwrap()
        };

        assert_eq!(render(TextSearchType::Raw, None), "fts.rust & remote");
        assert_eq!(render(TextSearchType::Plain, None), "plfts.rust & remote");
        assert_eq!(render(TextSearchType::Phrase, Some("english")), "phfts(english).rust & remote");
        assert_eq!(render(TextSearchType::Websearch, None), "wfts.rust & remote");
    }

    #[test]
    fn test_text_search_replaces_previous_predicate() {
        let query = SelectQuery::from_table("jobs")
            .text_search("fts", "first", TextSearchType::Raw, None)
            .text_search("fts", "second", TextSearchType::Raw, None);

        assert_eq!(query.text_search.unwrap().query, "second");
    }

    #[test]
    fn test_empty_projection_selects_all() {
        assert_eq!(SelectQuery::from_table("jobs").select_clause(), "*");
    }
}
