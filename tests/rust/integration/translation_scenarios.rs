//! End-to-end translation of YAML query descriptions over the sales catalog

#[cfg(test)]
mod translation_scenario_tests {
    use odata_translator::aggregation::AggregationError;
    use odata_translator::path_token::PathTokenError;
    use odata_translator::select_expand::SelectExpandError;
    use odata_translator::uri_composer::ComposeError;
    use odata_translator::{
        ComposedQuery, QueryDescription, TranslationError, Translator, TranslatorConfig,
    };

    use super::super::sales_catalog;

    fn translate_with(
        config: TranslatorConfig,
        yaml: &str,
    ) -> Result<ComposedQuery, TranslationError> {
        let catalog = sales_catalog();
        let query: QueryDescription = serde_yaml::from_str(yaml).unwrap();
        let translator = Translator::new(&catalog, config);
        translator.translate(&query)
    }

    fn translate(yaml: &str) -> Result<ComposedQuery, TranslationError> {
        translate_with(TranslatorConfig::default(), yaml)
    }

    #[test]
    fn test_count_distinct_without_grouping() {
        let composed = translate(
            r#"
entity_type: Sale
stages:
  - aggregate:
      key_selector:
        constant: "1"
      aggregates:
        - source_path: RowParity
          kind: count_distinct
"#,
        )
        .unwrap();
        assert_eq!(
            composed.options.to_query_string(),
            "$apply=aggregate(RowParity with countdistinct as CountDistinctRowParity)"
        );
    }

    #[test]
    fn test_group_by_single_member() {
        let composed = translate(
            r#"
entity_type: Sale
stages:
  - aggregate:
      key_selector:
        member: RowParity
      aggregates:
        - alias: SumIntProp
          source_path: IntProp
          kind: sum
"#,
        )
        .unwrap();
        assert_eq!(
            composed.options.apply.as_deref(),
            Some("groupby((RowParity),aggregate(IntProp with sum as SumIntProp))")
        );
    }

    #[test]
    fn test_constant_group_over_navigation_path() {
        let composed = translate(
            r#"
entity_type: Sale
stages:
  - aggregate:
      key_selector:
        constant: "1"
      aggregates:
        - alias: SumTaxRate
          source_path: [Product, TaxRate]
          kind: average
"#,
        )
        .unwrap();
        assert_eq!(
            composed.options.apply.as_deref(),
            Some("aggregate(Product/TaxRate with average as SumTaxRate)")
        );
    }

    #[test]
    fn test_filter_then_group_by_navigation_member() {
        let composed = translate(
            r#"
entity_type: Sale
stages:
  - filter: "CurrencyCode eq 'USD'"
  - aggregate:
      key_selector:
        member: Product/Color
      aggregates:
        - alias: ProductAvgTaxRate
          source_path: Product/TaxRate
          kind: average
"#,
        )
        .unwrap();
        assert_eq!(
            composed.options.apply.as_deref(),
            Some(
                "filter(CurrencyCode eq 'USD')/groupby((Product/Color),aggregate(Product/TaxRate with average as ProductAvgTaxRate))"
            )
        );
        assert_eq!(composed.options.filter, None);

        let shape = composed.result_shape.unwrap();
        let names: Vec<&str> = shape.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Product/Color", "ProductAvgTaxRate"]);
        assert_eq!(shape.column("Product/Color").unwrap().json_pointer(), "/Product/Color");
    }

    #[test]
    fn test_projection_chains_and_paths() {
        let composed = translate(
            r#"
entity_type: Sale
projection:
  - root: s
    chains:
      - [Amount]
      - [Product, Category, Name]
    paths:
      - Customer/*
      - Lines/Quantity
"#,
        )
        .unwrap();
        assert_eq!(composed.options.select, vec!["Amount"]);
        assert_eq!(
            composed.options.expand,
            vec![
                "Product($expand=Category($select=Name))",
                "Customer",
                "Lines($select=Quantity)",
            ]
        );
    }

    #[test]
    fn test_member_of_complex_property_is_rejected() {
        let err = translate(
            r#"
entity_type: Sale
projection:
  - root: s
    chains:
      - [ShipTo, City]
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TranslationError::SelectExpand(SelectExpandError::StructuralTraversal { ref member, ref through })
                if member == "City" && through == "ShipTo"
        ));
    }

    #[test]
    fn test_full_option_string_order() {
        let composed = translate(
            r#"
entity_type: Sale
stages:
  - filter: "Amount gt 10"
  - filter: "CurrencyCode eq 'EUR'"
  - order_by: "Amount desc"
  - order_by: "Id"
  - skip: 20
  - top: 10
projection:
  - root: s
    chains:
      - [Id]
      - [Customer, Name]
"#,
        )
        .unwrap();
        assert_eq!(
            composed.options.to_query_string(),
            "$filter=(Amount gt 10) and (CurrencyCode eq 'EUR')&$select=Id&$expand=Customer($select=Name)&$orderby=Amount desc,Id&$skip=20&$top=10"
        );
        assert!(composed.result_shape.is_none());
    }

    #[test]
    fn test_paging_after_aggregation() {
        let composed = translate(
            r#"
entity_type: Sale
stages:
  - aggregate:
      key_selector:
        member_init:
          - {member: Color, path: Product/Color}
          - {member: Country, path: Customer/Country}
      aggregates:
        - {alias: Total, source_path: Amount, kind: sum}
        - {alias: Rows, kind: count}
  - filter: "Total gt 100"
  - order_by: "Total desc"
  - top: 5
"#,
        )
        .unwrap();
        assert_eq!(
            composed.options.to_query_string(),
            "$apply=groupby((Product/Color,Customer/Country),aggregate(Amount with sum as Total,$count as Rows))/filter(Total gt 100)&$orderby=Total desc&$top=5"
        );
        let shape = composed.result_shape.unwrap();
        assert_eq!(shape.column("Color").unwrap().location, vec!["Product", "Color"]);
        assert!(!shape.column("Rows").unwrap().nullable);
    }

    #[test]
    fn test_ordering_before_aggregation_is_rejected() {
        let err = translate(
            r#"
entity_type: Sale
stages:
  - order_by: "Amount desc"
  - aggregate:
      aggregates:
        - {alias: Total, source_path: Amount, kind: sum}
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.as_aggregation(),
            Some(AggregationError::AggregationOrderingViolation { .. })
        ));
    }

    #[test]
    fn test_duplicate_top_is_rejected() {
        let err = translate(
            r#"
entity_type: Sale
stages:
  - top: 5
  - top: 6
"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TranslationError::Compose(ComposeError::DuplicateQueryOption("$top"))
        );
    }

    #[test]
    fn test_sum_over_boolean_has_no_overload() {
        let err = translate(
            r#"
entity_type: Sale
stages:
  - aggregate:
      aggregates:
        - {alias: Flags, source_path: Flag, kind: sum}
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.as_aggregation(),
            Some(AggregationError::UnsupportedAggregationTarget { path, .. }) if path == "Flag"
        ));
    }

    #[test]
    fn test_range_variable_path_is_rejected() {
        let err = translate(
            r#"
entity_type: Sale
projection:
  - root: s
    paths:
      - $it/Amount
"#,
        )
        .unwrap_err();
        assert_eq!(err.as_path_token().map(PathTokenError::keyword), Some("$it"));
    }

    #[test]
    fn test_expand_depth_limit_from_config() {
        let config = TranslatorConfig {
            max_expand_depth: 2,
            ..TranslatorConfig::default()
        };
        let err = translate_with(
            config,
            r#"
entity_type: Sale
projection:
  - root: s
    chains:
      - [Product, Category, Name]
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TranslationError::SelectExpand(SelectExpandError::ExpandDepthExceeded { depth: 3, max: 2, .. })
        ));
    }

    #[test]
    fn test_derived_type_cast_in_projection() {
        let composed = translate(
            r#"
entity_type: Sale
projection:
  - root: s
    chains:
      - [{member: Channel, cast: OnlineSale}]
"#,
        )
        .unwrap();
        assert_eq!(composed.options.select, vec!["Test.Sales.OnlineSale/Channel"]);
    }

    #[test]
    fn test_translation_is_deterministic() {
        let yaml = r#"
entity_type: Sale
stages:
  - filter: "CurrencyCode eq 'USD'"
  - aggregate:
      key_selector:
        member: Product/Color
      aggregates:
        - source_path: Product/TaxRate
          kind: max
projection:
  - root: s
    chains:
      - [Customer, Name]
"#;
        let first = translate(yaml).unwrap();
        let second = translate(yaml).unwrap();
        assert_eq!(first.options.to_query_string(), second.options.to_query_string());
        assert_eq!(first, second);
    }

    #[test]
    fn test_documented_query_description() {
        let composed = translate(
            r#"
entity_type: Sale
stages:
  - filter: "CurrencyCode eq 'USD'"
  - aggregate:
      key_selector:
        member: Product/Color
      aggregates:
        - alias: ProductAvgTaxRate
          source_path: Product/TaxRate
          kind: average
projection:
  - root: s
    chains:
      - [Product, Color]
    paths:
      - Customer/*
"#,
        )
        .unwrap();
        assert_eq!(
            composed.options.to_query_string(),
            "$apply=filter(CurrencyCode eq 'USD')/groupby((Product/Color),aggregate(Product/TaxRate with average as ProductAvgTaxRate))&$expand=Product($select=Color),Customer"
        );
    }

    #[test]
    fn test_stages_round_trip_through_yaml() {
        let yaml = r#"
entity_type: Sale
stages:
  - filter: "Amount gt 1"
  - aggregate:
      key_selector:
        member_init:
          - {member: Color, path: [Product, Color]}
      aggregates:
        - {alias: Rows, kind: count}
  - top: 3
"#;
        let query: QueryDescription = serde_yaml::from_str(yaml).unwrap();
        let written = serde_yaml::to_string(&query).unwrap();
        assert!(!written.contains("!filter"), "{}", written);

        let original = translate(yaml).unwrap();
        let reparsed = translate(&written).unwrap();
        assert_eq!(original, reparsed);
        assert_eq!(
            original.options.apply.as_deref(),
            Some("filter(Amount gt 1)/groupby((Product/Color),aggregate($count as Rows))")
        );
    }

    #[test]
    fn test_parsed_paths_and_chains_agree() {
        for (chain, path) in [
            ("[Product, Category, Name]", "Product/Category/Name"),
            ("[Customer, Name]", "Customer/Name"),
            ("[Amount]", "Amount"),
            ("[ShipTo]", "ShipTo"),
        ] {
            let from_chain = translate(&format!(
                "entity_type: Sale\nprojection:\n  - root: s\n    chains:\n      - {}\n",
                chain
            ))
            .unwrap();
            let from_path = translate(&format!(
                "entity_type: Sale\nprojection:\n  - root: s\n    paths:\n      - {}\n",
                path
            ))
            .unwrap();
            assert_eq!(from_chain.options, from_path.options, "chain {} vs path {}", chain, path);
        }
    }

    #[test]
    fn test_parsed_paths_and_chains_reject_alike() {
        for (chain, path) in [("[ShipTo, City]", "ShipTo/City"), ("[Amount, Scale]", "Amount/Scale")] {
            let from_chain = translate(&format!(
                "entity_type: Sale\nprojection:\n  - root: s\n    chains:\n      - {}\n",
                chain
            ))
            .unwrap_err();
            let from_path = translate(&format!(
                "entity_type: Sale\nprojection:\n  - root: s\n    paths:\n      - {}\n",
                path
            ))
            .unwrap_err();
            assert_eq!(from_chain, from_path, "chain {} vs path {}", chain, path);
        }

        let err = translate("entity_type: Sale\nprojection:\n  - root: s\n    paths:\n      - '*/Amount'\n")
            .unwrap_err();
        assert!(matches!(
            err,
            TranslationError::SelectExpand(SelectExpandError::StructuralTraversal { ref through, .. })
                if through == "*"
        ));
    }

    #[test]
    fn test_filter_after_top_is_rejected() {
        let err = translate(
            r#"
entity_type: Sale
stages:
  - top: 5
  - filter: "Amount gt 1"
"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TranslationError::Compose(ComposeError::StageOrderingViolation {
                stage: "filter(Amount gt 1)".to_string(),
                after: "top(5)".to_string(),
            })
        );

        let composed = translate(
            r#"
entity_type: Sale
stages:
  - filter: "Amount gt 1"
  - top: 5
"#,
        )
        .unwrap();
        assert_eq!(composed.options.to_query_string(), "$filter=Amount gt 1&$top=5");
    }
}
