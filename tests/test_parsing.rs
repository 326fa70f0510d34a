//! Parser diagnostics tests.
//!
//! The parser never aborts over recoverable problems; these tests feed it
//! deliberately broken documents and check that the right diagnostic lands
//! in the error log while the rest of the tree still comes back.

#[cfg(test)]
mod test_parsing {
    use sedml::prelude::*;

    fn wrap(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <sedML xmlns=\"{}\" level=\"1\" version=\"4\">{body}</sedML>",
            sedml_namespace_uri(1, 4)
        )
    }

    #[test]
    fn minimal_document_parses_cleanly() {
        let xml = wrap(
            "<listOfModels>\
               <model id=\"m1\" language=\"urn:sedml:language:sbml\" source=\"model.xml\"/>\
             </listOfModels>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        assert_eq!(doc.num_errors(), 0);
        assert_eq!(doc.effective_level(), 1);
        assert_eq!(doc.effective_version(), 4);
        assert_eq!(doc.model("m1").and_then(|m| m.source()), Some("model.xml"));
    }

    #[test]
    fn missing_root_is_a_hard_error() {
        let err = read_sedml_string("<?xml version=\"1.0\"?>\n").unwrap_err();
        assert!(matches!(err, SedIoError::MissingRoot));
    }

    #[test]
    fn wrong_root_element_is_logged() {
        let doc = read_sedml_string("<sbml level=\"3\"/>").unwrap();
        assert!(doc.error_log().contains(SedErrorCode::UnrecognizedElement));
    }

    #[test]
    fn missing_namespace_is_logged() {
        let doc = read_sedml_string("<sedML level=\"1\" version=\"4\"/>").unwrap();
        assert!(doc.error_log().contains(SedErrorCode::NsUndeclared));
    }

    #[test]
    fn foreign_namespace_is_logged() {
        let xml = "<sedML xmlns=\"http://example.org/other\" level=\"1\" version=\"4\"/>";
        let doc = read_sedml_string(xml).unwrap();
        assert!(doc.error_log().contains(SedErrorCode::ElementNotInNs));
    }

    #[test]
    fn unknown_attribute_is_ignored_and_logged() {
        let xml = wrap(
            "<listOfModels>\
               <model id=\"m1\" source=\"model.xml\" flavour=\"strawberry\"/>\
             </listOfModels>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        assert!(doc.error_log().contains(SedErrorCode::ModelAllowedAttributes));
        // The element itself is intact.
        assert_eq!(doc.model("m1").and_then(|m| m.source()), Some("model.xml"));
    }

    #[test]
    fn unrecognized_element_is_skipped_with_a_warning() {
        let xml = wrap(
            "<listOfModels>\
               <model id=\"m1\" source=\"model.xml\">\
                 <listOfGadgets><gadget/></listOfGadgets>\
               </model>\
             </listOfModels>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        let err = doc
            .error_log()
            .errors()
            .iter()
            .find(|e| e.code() == SedErrorCode::UnrecognizedElement)
            .unwrap();
        assert_eq!(err.severity(), SedSeverity::Warning);
        assert_eq!(doc.models().len(), 1);
    }

    #[test]
    fn malformed_double_is_logged_and_left_unset() {
        let xml = wrap(
            "<listOfSimulations>\
               <uniformTimeCourse id=\"sim1\" initialTime=\"soon\" outputStartTime=\"0\" \
                                  outputEndTime=\"10\" numberOfSteps=\"100\">\
                 <algorithm kisaoID=\"KISAO:0000019\"/>\
               </uniformTimeCourse>\
             </listOfSimulations>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        assert!(doc
            .error_log()
            .contains(SedErrorCode::UniformTimeCourseInitialTimeMustBeDouble));

        match doc.simulation("sim1").unwrap() {
            SedSimulation::UniformTimeCourse(s) => {
                assert_eq!(s.initial_time(), None);
                assert_eq!(s.output_end_time(), Some(10.0));
            }
            other => panic!("unexpected simulation kind: {other:?}"),
        }
    }

    #[test]
    fn unknown_enumeration_token_stores_the_sentinel() {
        let xml = wrap(
            "<listOfOutputs>\
               <plot2D id=\"p1\">\
                 <xAxis type=\"sideways\"/>\
               </plot2D>\
             </listOfOutputs>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        assert!(doc.error_log().contains(SedErrorCode::AxisTypeMustBeAxisTypeEnum));

        match doc.output("p1").unwrap() {
            SedOutput::Plot2D(p) => {
                let axis = p.x_axis().unwrap();
                assert_eq!(axis.axis_type(), Some(AxisType::Invalid));
            }
            other => panic!("unexpected output kind: {other:?}"),
        }
    }

    #[test]
    fn numbers_of_points_spelling_is_accepted() {
        let xml = wrap(
            "<listOfSimulations>\
               <uniformTimeCourse id=\"sim1\" initialTime=\"0\" outputStartTime=\"0\" \
                                  outputEndTime=\"10\" numberOfPoints=\"50\">\
                 <algorithm kisaoID=\"KISAO:0000019\"/>\
               </uniformTimeCourse>\
             </listOfSimulations>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        match doc.simulation("sim1").unwrap() {
            SedSimulation::UniformTimeCourse(s) => {
                assert_eq!(s.number_of_steps(), Some(50));
            }
            other => panic!("unexpected simulation kind: {other:?}"),
        }
    }

    #[test]
    fn document_without_level_is_reported() {
        let xml = format!(
            "<sedML xmlns=\"{}\" version=\"4\"/>",
            sedml_namespace_uri(1, 4)
        );
        let doc = read_sedml_string(&xml).unwrap();
        assert!(doc.num_errors() >= 1);
        assert!(doc.error_log().contains(SedErrorCode::DocumentAllowedAttributes));
        assert!(!doc.has_required_attributes());
        // Writing still falls back to the library defaults.
        assert_eq!(doc.effective_level(), 1);
    }

    #[test]
    fn dangling_reference_is_reported_by_validation() {
        let xml = wrap(
            "<listOfTasks>\
               <task id=\"t1\" modelReference=\"ghost\"/>\
             </listOfTasks>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        assert!(doc
            .error_log()
            .contains(SedErrorCode::TaskModelReferenceMustBeModel));
    }

    #[test]
    fn duplicate_ids_are_reported_by_validation() {
        let xml = wrap(
            "<listOfModels>\
               <model id=\"dup\" source=\"a.xml\"/>\
               <model id=\"dup\" source=\"b.xml\"/>\
             </listOfModels>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        assert!(doc.error_log().contains(SedErrorCode::DuplicateComponentId));
        // Both elements are kept.
        assert_eq!(doc.models().len(), 2);
    }

    #[test]
    fn bad_vector_range_value_is_logged() {
        let xml = wrap(
            "<listOfTasks>\
               <repeatedTask id=\"rt1\" range=\"r1\" resetModel=\"true\">\
                 <listOfRanges>\
                   <vectorRange id=\"r1\">\
                     <value>1.0</value>\
                     <value>lots</value>\
                   </vectorRange>\
                 </listOfRanges>\
               </repeatedTask>\
             </listOfTasks>",
        );
        let doc = read_sedml_string(&xml).unwrap();
        assert!(doc
            .error_log()
            .contains(SedErrorCode::VectorRangeValueMustBeDoubleList));

        match doc.task("rt1").unwrap() {
            SedAbstractTask::RepeatedTask(rt) => match rt.ranges().get(0).unwrap() {
                SedRange::VectorRange(r) => assert_eq!(r.values(), &[1.0]),
                other => panic!("unexpected range kind: {other:?}"),
            },
            other => panic!("unexpected task kind: {other:?}"),
        }
    }

    #[test]
    fn missing_required_attribute_is_reported() {
        // Model without a source.
        let xml = wrap("<listOfModels><model id=\"m1\"/></listOfModels>");
        let doc = read_sedml_string(&xml).unwrap();
        assert!(doc.error_log().contains(SedErrorCode::ModelAllowedAttributes));
    }

    #[test]
    fn diagnostics_carry_line_numbers() {
        let xml = format!(
            "<?xml version=\"1.0\"?>\n\
             <sedML xmlns=\"{}\" level=\"1\" version=\"4\">\n\
               <listOfModels>\n\
                 <model id=\"m1\" source=\"model.xml\" flavour=\"mint\"/>\n\
               </listOfModels>\n\
             </sedML>",
            sedml_namespace_uri(1, 4)
        );
        let doc = read_sedml_string(&xml).unwrap();
        let err = doc
            .error_log()
            .errors()
            .iter()
            .find(|e| e.code() == SedErrorCode::ModelAllowedAttributes)
            .unwrap();
        assert_eq!(err.line(), Some(4));
    }
}
