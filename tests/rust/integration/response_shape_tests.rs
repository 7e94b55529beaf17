//! Validation of aggregated response payloads against the shape a translation predicts

#[cfg(test)]
mod response_shape_integration_tests {
    use odata_translator::response_shape::ResponseShapeError;
    use odata_translator::{QueryDescription, ResultShape, Translator, TranslatorConfig};
    use serde_json::json;

    use super::super::sales_catalog;

    fn shape_for(yaml: &str) -> ResultShape {
        let catalog = sales_catalog();
        let query: QueryDescription = serde_yaml::from_str(yaml).unwrap();
        let translator = Translator::new(&catalog, TranslatorConfig::default());
        let composed = translator.translate(&query).unwrap();
        composed
            .result_shape
            .expect("aggregating query should predict a result shape")
    }

    fn color_tax_shape() -> ResultShape {
        shape_for(
            r#"
entity_type: Sale
stages:
  - aggregate:
      key_selector:
        member: Product/Color
      aggregates:
        - {alias: AvgTax, source_path: Product/TaxRate, kind: average}
        - {alias: LineCount, kind: count}
        - {alias: Buyers, source_path: Customer/Name, kind: count_distinct}
"#,
        )
    }

    #[test]
    fn test_well_formed_payload() {
        let payload = json!({
            "@odata.context": "$metadata#Sales(Product(Color),AvgTax,LineCount,Buyers)",
            "value": [
                {"Product": {"Color": "Red"}, "AvgTax": 0.19, "LineCount": 4, "Buyers": 2},
                {"Product": {"Color": null}, "AvgTax": "0.07", "LineCount": 1, "Buyers": 1},
                {"Product": {"Color": "Blue"}, "AvgTax": null, "LineCount": 0, "Buyers": 0}
            ]
        });
        assert_eq!(color_tax_shape().validate_payload(&payload).unwrap(), 3);
    }

    #[test]
    fn test_missing_grouping_key() {
        let payload = json!({"value": [{"AvgTax": 0.19, "LineCount": 4, "Buyers": 2}]});
        assert_eq!(
            color_tax_shape().validate_payload(&payload).unwrap_err(),
            ResponseShapeError::MissingColumn {
                column: "Product/Color".to_string(),
                pointer: "/Product/Color".to_string(),
            }
        );
    }

    #[test]
    fn test_null_count_is_rejected() {
        let payload = json!({
            "value": [{"Product": {"Color": "Red"}, "AvgTax": 0.19, "LineCount": null, "Buyers": 2}]
        });
        assert_eq!(
            color_tax_shape().validate_payload(&payload).unwrap_err(),
            ResponseShapeError::UnexpectedNull {
                column: "LineCount".to_string()
            }
        );
    }

    #[test]
    fn test_string_where_count_expected() {
        let payload = json!({
            "value": [{"Product": {"Color": "Red"}, "AvgTax": 0.19, "LineCount": 4, "Buyers": "two"}]
        });
        assert!(matches!(
            color_tax_shape().validate_payload(&payload),
            Err(ResponseShapeError::TypeMismatch { ref column, .. }) if column == "Buyers"
        ));
    }

    #[test]
    fn test_payload_without_value_array() {
        assert_eq!(
            color_tax_shape().validate_payload(&json!({"rows": []})).unwrap_err(),
            ResponseShapeError::MissingValueArray
        );
    }

    #[test]
    fn test_sum_of_int64_accepts_ieee754_strings() {
        let shape = shape_for(
            r#"
entity_type: Sale
stages:
  - aggregate:
      key_selector:
        member: RowParity
      aggregates:
        - {alias: TotalUnits, source_path: Units, kind: sum}
"#,
        );
        let payload = json!({
            "value": [
                {"RowParity": "even", "TotalUnits": "9007199254740993"},
                {"RowParity": "odd", "TotalUnits": 12}
            ]
        });
        assert_eq!(shape.validate_payload(&payload).unwrap(), 2);

        let bad = json!({"value": [{"RowParity": "odd", "TotalUnits": "lots"}]});
        assert!(shape.validate_payload(&bad).is_err());
    }
}
