//! Aggregation clause rendering and legality through the public API.

#[cfg(test)]
mod aggregation_clause_tests {
    use odata_translator::aggregation::{
        AggregateFact, AggregationClauseBuilder, AggregationError, AggregationKind, GroupingKey,
        GroupingSpec, KeySelector,
    };
    use odata_translator::edm::EdmCatalog;
    use odata_translator::TranslatorConfig;
    use test_case::test_case;

    const ROWS: &str = r#"
entity_types:
  - name: Row
    properties:
      - { name: RowParity, type: Edm.String }
      - { name: IntProp, type: Edm.Int32, nullable: false }
      - { name: DoubleProp, type: Edm.Double }
      - { name: Product, navigation: Product }
      - { name: Related, navigation: Row, collection: true }
  - name: Product
    properties:
      - { name: TaxRate, type: Edm.Decimal }
      - { name: Category, navigation: Category }
  - name: Category
    properties:
      - { name: Id, type: Edm.Int32 }
"#;

    fn render(grouping: GroupingSpec, facts: &[AggregateFact]) -> Result<String, AggregationError> {
        let catalog = EdmCatalog::from_yaml_str(ROWS).unwrap();
        let config = TranslatorConfig::default();
        AggregationClauseBuilder::new(&catalog, "Row", &config)?
            .build(&grouping, facts)
            .map(|clause| clause.text)
    }

    #[test_case(AggregationKind::Sum, "sum"; "sum")]
    #[test_case(AggregationKind::Average, "average"; "average")]
    #[test_case(AggregationKind::Min, "min"; "min")]
    #[test_case(AggregationKind::Max, "max"; "max")]
    #[test_case(AggregationKind::CountDistinct, "countdistinct"; "countdistinct")]
    fn test_kind_keyword(kind: AggregationKind, keyword: &str) {
        let text = render(
            GroupingSpec::None,
            &[AggregateFact::new("Value", ["DoubleProp"], kind)],
        )
        .unwrap();
        assert_eq!(text, format!("aggregate(DoubleProp with {} as Value)", keyword));
    }

    /// Aliases are copied verbatim, casing included
    #[test_case("SumIntProp")]
    #[test_case("sumintprop")]
    #[test_case("SUM_int_Prop2")]
    fn test_alias_fidelity(alias: &str) {
        let text = render(
            GroupingSpec::None,
            &[AggregateFact::new(alias, ["IntProp"], AggregationKind::Sum)],
        )
        .unwrap();
        assert!(text.ends_with(&format!(" as {})", alias)));
    }

    #[test]
    fn test_deep_paths_are_slash_joined() {
        let text = render(
            GroupingSpec::Keys(vec![GroupingKey::new(["Product", "Category", "Id"])]),
            &[AggregateFact::new("Tax", ["Product", "TaxRate"], AggregationKind::Max)],
        )
        .unwrap();
        assert_eq!(
            text,
            "groupby((Product/Category/Id),aggregate(Product/TaxRate with max as Tax))"
        );
    }

    /// Constant keys never emit groupby; explicit keys always do
    #[test]
    fn test_constant_group_law() {
        let facts = [AggregateFact::count("Total")];
        let constant =
            GroupingSpec::try_from(KeySelector::Constant("1".to_string())).unwrap();
        assert!(!render(constant, &facts).unwrap().contains("groupby("));

        let keyed = GroupingSpec::try_from(KeySelector::Member(vec!["RowParity".to_string()]))
            .unwrap();
        assert!(render(keyed, &facts).unwrap().starts_with("groupby(("));
    }

    #[test]
    fn test_collection_navigation_rejected() {
        let err = render(
            GroupingSpec::None,
            &[AggregateFact::new("S", ["Related", "IntProp"], AggregationKind::Sum)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AggregationError::UnsupportedAggregationTarget { ref path, .. } if path == "Related/IntProp"
        ));
    }

    #[test]
    fn test_count_distinct_over_entity_rejected() {
        let err = render(
            GroupingSpec::None,
            &[AggregateFact::new(
                "C",
                ["Product", "Category"],
                AggregationKind::CountDistinct,
            )],
        )
        .unwrap_err();
        assert!(err.to_string().contains("entity reference `Category`"));
    }
}
