//! Lesson content. Ids are assigned by position, starting at 1.

use learn_core::lesson::{CompanionTask, LessonRecord, SqlTask};
use learn_core::rule::{
    ColumnRule, Comparison, CompanionRule, RowCount, SortDirection, ValidationRule,
};

struct Draft {
    title: &'static str,
    description: &'static str,
    objective: &'static str,
    sql: SqlTask,
    companion: CompanionTask,
    hints: &'static [&'static str],
}

fn sql(
    concept: &str,
    example: &str,
    task_prompt: &str,
    reference_query: &str,
    rule: ValidationRule,
) -> SqlTask {
    SqlTask {
        concept: concept.to_string(),
        example: example.to_string(),
        task_prompt: task_prompt.to_string(),
        reference_query: reference_query.to_string(),
        rule,
    }
}

fn companion(
    concept: &str,
    example: &str,
    task_prompt: &str,
    reference_answer: &str,
    tokens: &[&str],
) -> CompanionTask {
    CompanionTask {
        concept: concept.to_string(),
        example: example.to_string(),
        task_prompt: task_prompt.to_string(),
        reference_answer: reference_answer.to_string(),
        rule: CompanionRule::new(tokens.iter().copied()),
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

pub(crate) fn lessons() -> Vec<LessonRecord> {
    drafts()
        .into_iter()
        .zip(1_u32..)
        .map(|(draft, id)| LessonRecord {
            id,
            title: draft.title.to_string(),
            description: draft.description.to_string(),
            objective: draft.objective.to_string(),
            sql_task: draft.sql,
            companion_task: draft.companion,
            hints: draft.hints.iter().map(|h| (*h).to_string()).collect(),
        })
        .collect()
}

#[allow(clippy::too_many_lines)]
fn drafts() -> Vec<Draft> {
    vec![
        Draft {
            title: "Introduction to Databases",
            description: "Learn the basics of databases and how to query data with SQL SELECT statements",
            objective: "Understand database concepts and write your first SQL query to retrieve all movies",
            sql: sql(
                "SQL uses SELECT statements to query data from tables. The most basic query selects all columns (*) from a table.",
                "SELECT * FROM movies;",
                "Write a SQL query to select all movies from the movies table. Use SELECT * to get all columns. Don't forget the semicolon!",
                "SELECT * FROM movies;",
                ValidationRule::new()
                    .keywords(["select", "from", "movies", "*", ";"])
                    .rows(RowCount::NonEmpty),
            ),
            companion: companion(
                "Convex uses query functions to retrieve data. The db.query() method returns documents from a table.",
                "ctx.db.query(\"movies\").collect()",
                "In Convex, you would use a query function to get all movies from the movies table.",
                "await ctx.db.query(\"movies\").collect()",
                &["db.query", "movies", "collect"],
            ),
            hints: &[
                "SQL queries MUST end with a semicolon (;)",
                "SELECT * means 'select all columns': id, title, director, year, length_minutes, language, worldwide_gross_millions",
                "The correct syntax is: SELECT * FROM tablename;",
                "Make sure to include: SELECT, *, FROM, movies, and ;",
            ],
        },
        Draft {
            title: "Selecting Specific Columns",
            description: "Pick only the columns you need instead of every column in the table",
            objective: "List every movie's title and release year, and nothing else",
            sql: sql(
                "List column names after SELECT, separated by commas, to return only those columns in that order.",
                "SELECT director, language FROM movies;",
                "Write a query that returns only the title and year of every movie.",
                "SELECT title, year FROM movies;",
                ValidationRule::new()
                    .keywords(["select", "from", "movies"])
                    .columns(ColumnRule::Exactly(columns(&["title", "year"])))
                    .rows(RowCount::Exactly(14)),
            ),
            companion: companion(
                "Convex returns whole documents. Project the fields you want in TypeScript after collecting.",
                "(await ctx.db.query(\"movies\").collect()).map((m) => ({ director: m.director }))",
                "Return only the title and year of every movie document.",
                "(await ctx.db.query(\"movies\").collect()).map((m) => ({ title: m.title, year: m.year }))",
                &["collect", "map", "title", "year"],
            ),
            hints: &[
                "Replace * with the column names you want",
                "Separate column names with commas: SELECT a, b FROM ...",
                "The columns are called title and year",
            ],
        },
        Draft {
            title: "Filtering Rows with WHERE",
            description: "Use WHERE to keep only the rows that match a condition",
            objective: "Find the movies released after 2005",
            sql: sql(
                "A WHERE clause filters rows before they are returned. Numeric columns support comparisons like =, >, <, >= and <=.",
                "SELECT title FROM movies WHERE length_minutes < 100;",
                "Return the title and year of every movie released after 2005.",
                "SELECT title, year FROM movies WHERE year > 2005;",
                ValidationRule::new()
                    .keywords(["select", "from", "movies", "where"])
                    .columns(ColumnRule::Exactly(columns(&["title", "year"])))
                    .rows(RowCount::Exactly(8))
                    .value("year", Comparison::Gt, 2005_i64),
            ),
            companion: companion(
                "Convex filters documents with .filter() and query operators such as q.gt, q.lt and q.eq.",
                "ctx.db.query(\"movies\").filter((q) => q.lt(q.field(\"length_minutes\"), 100)).collect()",
                "Collect the movies whose year is greater than 2005.",
                "ctx.db.query(\"movies\").filter((q) => q.gt(q.field(\"year\"), 2005)).collect()",
                &["filter", "q.gt", "year"],
            ),
            hints: &[
                "Put the WHERE clause after FROM movies",
                "'After 2005' means strictly greater: use >",
                "SELECT title, year FROM movies WHERE year ...",
            ],
        },
        Draft {
            title: "Filtering Text Values",
            description: "Compare text columns against quoted string values",
            objective: "Find every movie directed by John Lasseter",
            sql: sql(
                "Text values in SQL are written in single quotes. = compares text exactly, including capitalisation.",
                "SELECT title FROM movies WHERE language = 'English';",
                "Return the title and director of every movie directed by John Lasseter.",
                "SELECT title, director FROM movies WHERE director = 'John Lasseter';",
                ValidationRule::new()
                    .keywords(["select", "from", "movies", "where"])
                    .literals(["john lasseter"])
                    .columns(ColumnRule::Includes(columns(&["title", "director"])))
                    .rows(RowCount::Exactly(5))
                    .value("director", Comparison::Eq, "John Lasseter"),
            ),
            companion: companion(
                "The same q.eq operator compares strings in Convex filters.",
                "ctx.db.query(\"movies\").filter((q) => q.eq(q.field(\"language\"), \"English\")).collect()",
                "Collect the movies whose director is John Lasseter.",
                "ctx.db.query(\"movies\").filter((q) => q.eq(q.field(\"director\"), \"John Lasseter\")).collect()",
                &["filter", "q.eq", "director"],
            ),
            hints: &[
                "Wrap text in single quotes: 'like this'",
                "The name must match exactly: 'John Lasseter'",
                "Select both title and director so you can check the result",
            ],
        },
        Draft {
            title: "Sorting and Limiting Results",
            description: "Order rows with ORDER BY and cut the list short with LIMIT",
            objective: "Find the three longest movies",
            sql: sql(
                "ORDER BY sorts the result by a column, ascending by default or descending with DESC. LIMIT n keeps only the first n rows.",
                "SELECT title, year FROM movies ORDER BY year ASC LIMIT 5;",
                "Return the title and length_minutes of the three longest movies, longest first.",
                "SELECT title, length_minutes FROM movies ORDER BY length_minutes DESC LIMIT 3;",
                ValidationRule::new()
                    .keywords(["select", "from", "movies", "order by", "desc", "limit"])
                    .columns(ColumnRule::Includes(columns(&["title", "length_minutes"])))
                    .rows(RowCount::Exactly(3))
                    .ordered("length_minutes", SortDirection::Descending),
            ),
            companion: companion(
                "Convex orders documents through an index with .order(\"asc\" | \"desc\") and caps the count with .take(n).",
                "ctx.db.query(\"movies\").withIndex(\"by_year\").order(\"asc\").take(5)",
                "Take the three longest movies using an index on length_minutes.",
                "ctx.db.query(\"movies\").withIndex(\"by_length\").order(\"desc\").take(3)",
                &["order", "desc", "take"],
            ),
            hints: &[
                "ORDER BY comes after FROM (and after WHERE, if any)",
                "Use DESC to put the largest values first",
                "LIMIT goes at the very end of the query",
                "SELECT title, length_minutes FROM movies ORDER BY ... DESC LIMIT 3;",
            ],
        },
        Draft {
            title: "Joining Tables",
            description: "Combine rows from two related tables with JOIN ... ON",
            objective: "Show each movie's title next to its rating",
            sql: sql(
                "JOIN pairs rows from two tables. The ON condition says which rows belong together, usually a key in one table matching a column in the other.",
                "SELECT movies.title, boxoffice.domestic_sales_millions FROM movies JOIN boxoffice ON movies.id = boxoffice.movie_id;",
                "Return every movie's title together with its rating from the boxoffice table.",
                "SELECT movies.title, boxoffice.rating FROM movies JOIN boxoffice ON movies.id = boxoffice.movie_id;",
                ValidationRule::new()
                    .keywords(["select", "from", "join", "on", "boxoffice"])
                    .columns(ColumnRule::Includes(columns(&["title", "rating"])))
                    .rows(RowCount::Exactly(14)),
            ),
            companion: companion(
                "Convex has no JOIN. Load the related document for each result with an indexed lookup.",
                "await ctx.db.query(\"boxoffice\").withIndex(\"by_movie\", (q) => q.eq(\"movie_id\", movie._id)).unique()",
                "For every movie, look up its boxoffice document and return the title with the rating.",
                "await Promise.all(movies.map(async (m) => ({ title: m.title, rating: (await ctx.db.query(\"boxoffice\").withIndex(\"by_movie\", (q) => q.eq(\"movie_id\", m._id)).unique())?.rating })))",
                &["boxoffice", "withindex", "unique"],
            ),
            hints: &[
                "boxoffice.movie_id refers to movies.id",
                "Prefix columns with their table name when both tables could have them: movies.title",
                "FROM movies JOIN boxoffice ON movies.id = boxoffice.movie_id",
            ],
        },
        Draft {
            title: "Aggregating with GROUP BY",
            description: "Summarise many rows into one row per group with aggregate functions",
            objective: "Count how many movies each director made",
            sql: sql(
                "GROUP BY collapses rows that share a value into one row. Aggregates such as COUNT(*), SUM and AVG are computed per group. AS names the result column.",
                "SELECT language, COUNT(*) AS total FROM movies GROUP BY language;",
                "Return each director with the number of movies they directed, naming the count column movie_count.",
                "SELECT director, COUNT(*) AS movie_count FROM movies GROUP BY director;",
                ValidationRule::new()
                    .keywords(["select", "from", "movies", "count", "group by"])
                    .columns(ColumnRule::Exactly(columns(&["director", "movie_count"])))
                    .rows(RowCount::Exactly(7)),
            ),
            companion: companion(
                "Convex queries return documents; aggregate them in TypeScript, for example with reduce.",
                "movies.reduce((total, m) => total + m.length_minutes, 0)",
                "Count the movies per director from the collected documents.",
                "movies.reduce((counts, m) => ({ ...counts, [m.director]: (counts[m.director] ?? 0) + 1 }), {})",
                &["reduce", "director"],
            ),
            hints: &[
                "COUNT(*) counts the rows in each group",
                "Name the count with AS movie_count",
                "Every non-aggregated column in SELECT should appear in GROUP BY",
            ],
        },
        Draft {
            title: "Querying the Theaters Table",
            description: "Put filtering and sorting together on a different table",
            objective: "Find the large theaters, biggest first",
            sql: sql(
                "WHERE and ORDER BY combine freely: filter first, then sort what remains. The theaters table lists venues with their seating capacity.",
                "SELECT name, location FROM theaters ORDER BY name;",
                "Return the name and capacity of theaters seating at least 220 people, largest first.",
                "SELECT name, capacity FROM theaters WHERE capacity >= 220 ORDER BY capacity DESC;",
                ValidationRule::new()
                    .keywords(["select", "from", "theaters", "where", "order by"])
                    .columns(ColumnRule::Includes(columns(&["name", "capacity"])))
                    .rows(RowCount::Exactly(3))
                    .value("capacity", Comparison::Ge, 220_i64)
                    .ordered("capacity", SortDirection::Descending),
            ),
            companion: companion(
                "Filters and sorting can be chained in Convex as well; sort in TypeScript when no index fits.",
                "(await ctx.db.query(\"theaters\").collect()).sort((a, b) => a.name.localeCompare(b.name))",
                "Collect theaters with capacity of at least 220, sorted by capacity descending.",
                "(await ctx.db.query(\"theaters\").filter((q) => q.gte(q.field(\"capacity\"), 220)).collect()).sort((a, b) => b.capacity - a.capacity)",
                &["theaters", "q.gte", "sort"],
            ),
            hints: &[
                "'At least 220' includes 220 itself: use >=",
                "WHERE comes before ORDER BY",
                "SELECT name, capacity FROM theaters WHERE ... ORDER BY capacity DESC;",
            ],
        },
    ]
}
