mod query_combinators;
