//! Round-trip tests over the public API.
//!
//! Each test builds a document programmatically, serializes it, parses the
//! result back, and checks that nothing was lost or invented along the way.

#[cfg(test)]
mod test_roundtrip {
    use pretty_assertions::assert_eq;
    use sedml::prelude::*;

    /// A document exercising every top-level container at once.
    fn build_document() -> SedDocument {
        let mut doc = SedDocument::new(1, 4);

        let model = doc.create_model();
        model.set_id("m1");
        model.set_language("urn:sedml:language:sbml");
        model.set_source("oscillator.xml");
        let mut change = SedChangeAttribute::new();
        change.set_target("/sbml:sbml/sbml:model/sbml:listOfSpecies/sbml:species[@id='S1']");
        change.set_new_value("10");
        model
            .changes_mut()
            .append(SedChange::ChangeAttribute(change))
            .unwrap();

        let mut algorithm = SedAlgorithm::new();
        algorithm.set_kisao_id("KISAO:0000019");
        let sim = doc.create_uniform_time_course();
        sim.set_id("sim1");
        sim.set_initial_time(0.0);
        sim.set_output_start_time(0.0);
        sim.set_output_end_time(100.0);
        sim.set_number_of_steps(1000);
        sim.set_algorithm(algorithm);

        let task = doc.create_task();
        task.set_id("t1");
        task.set_model_reference("m1");
        task.set_simulation_reference("sim1");

        let rt = doc.create_repeated_task();
        rt.set_id("rt1");
        rt.set_range("r1");
        rt.set_reset_model(true);
        let mut range = SedVectorRange::new();
        range.set_id("r1");
        range.set_values(vec![0.1, 1.0, 10.0]);
        rt.ranges_mut().append(SedRange::VectorRange(range)).unwrap();
        let mut st = SedSubTask::new();
        st.set_order(1);
        st.set_task("t1");
        rt.sub_tasks_mut().append(st).unwrap();

        for (id, target) in [
            ("dg_time", "symbol"),
            ("dg_s1", "/sbml:sbml/sbml:model/sbml:listOfSpecies/sbml:species[@id='S1']"),
        ] {
            let dg = doc.create_data_generator();
            dg.set_id(id);
            dg.set_math(MathML::new(format!("<ci> {id}_var </ci>")));
            let mut var = SedVariable::new();
            var.set_id(format!("{id}_var"));
            var.set_task_reference("t1");
            if target == "symbol" {
                var.set_symbol("urn:sedml:symbol:time");
            } else {
                var.set_target(target);
            }
            dg.variables_mut().append(var).unwrap();
        }

        let style = doc.create_style();
        style.set_id("s1");

        let report = doc.create_report();
        report.set_id("report1");
        let mut ds = SedDataSet::new();
        ds.set_id("ds1");
        ds.set_label("S1");
        ds.set_data_reference("dg_s1");
        report.data_sets_mut().append(ds).unwrap();

        let plot = doc.create_plot2d();
        plot.set_id("plot1");
        let mut x_axis = SedAxis::default();
        x_axis.set_axis_type(AxisType::Linear);
        plot.set_x_axis(x_axis);
        let mut y_axis = SedAxis::default();
        y_axis.set_axis_type(AxisType::Log10);
        plot.set_y_axis(y_axis);
        let mut curve = SedCurve::new();
        curve.set_id("c1");
        curve.set_curve_type(CurveType::Points);
        curve.set_x_data_reference("dg_time");
        curve.set_y_data_reference("dg_s1");
        curve.set_log_x(false);
        curve.set_log_y(true);
        curve.set_style("s1");
        plot.curves_mut().append(SedAbstractCurve::Curve(curve)).unwrap();

        doc
    }

    #[test]
    fn full_document_survives_a_round_trip() {
        // ARRANGE
        let doc = build_document();

        // ACT
        let xml = write_sedml_string(&doc).unwrap();
        let reread = read_sedml_string(&xml).unwrap();

        // ASSERT
        assert_eq!(reread.num_errors(), 0, "diagnostics: {:?}", reread.error_log());
        assert_eq!(reread.models().len(), 1);
        assert_eq!(reread.simulations().len(), 1);
        assert_eq!(reread.tasks().len(), 2);
        assert_eq!(reread.data_generators().len(), 2);
        assert_eq!(reread.outputs().len(), 2);
        assert_eq!(reread.styles().len(), 1);

        // Serializing the re-parsed tree reproduces the exact document.
        assert_eq!(write_sedml_string(&reread).unwrap(), xml);
    }

    #[test]
    fn attribute_values_are_preserved() {
        let doc = build_document();
        let xml = write_sedml_string(&doc).unwrap();
        let reread = read_sedml_string(&xml).unwrap();

        let model = reread.model("m1").unwrap();
        assert_eq!(model.source(), Some("oscillator.xml"));
        assert_eq!(model.language(), Some("urn:sedml:language:sbml"));
        assert_eq!(model.changes().len(), 1);

        let sim = match reread.simulation("sim1").unwrap() {
            SedSimulation::UniformTimeCourse(s) => s,
            other => panic!("unexpected simulation kind: {other:?}"),
        };
        assert_eq!(sim.output_end_time(), Some(100.0));
        assert_eq!(sim.number_of_steps(), Some(1000));
        assert_eq!(sim.algorithm().and_then(|a| a.kisao_id_number()), Some(19));

        let rt = match reread.task("rt1").unwrap() {
            SedAbstractTask::RepeatedTask(t) => t,
            other => panic!("unexpected task kind: {other:?}"),
        };
        match rt.ranges().get(0).unwrap() {
            SedRange::VectorRange(r) => assert_eq!(r.values(), &[0.1, 1.0, 10.0]),
            other => panic!("unexpected range kind: {other:?}"),
        }

        let dg = reread.data_generator("dg_time").unwrap();
        assert_eq!(dg.math().map(|m| m.content()), Some("<ci> dg_time_var </ci>"));
    }

    #[test]
    fn canonical_namespace_is_installed_on_write() {
        let doc = SedDocument::new(1, 3);
        let xml = write_sedml_string(&doc).unwrap();
        assert!(xml.contains(sedml_namespace_uri(1, 3)));

        let reread = read_sedml_string(&xml).unwrap();
        assert_eq!(reread.effective_level(), 1);
        assert_eq!(reread.effective_version(), 3);
        assert_eq!(reread.xmlns(), Some(sedml_namespace_uri(1, 3)));
    }

    #[test]
    fn conflicting_default_namespace_is_rebound() {
        let mut doc = SedDocument::new(1, 4);
        doc.set_xmlns("http://example.org/not-sedml");

        let xml = write_sedml_string(&doc).unwrap();
        assert!(xml.contains(sedml_namespace_uri(1, 4)));
        assert!(xml.contains("xmlns:addedPrefix=\"http://example.org/not-sedml\""));
    }

    #[test]
    fn empty_document_round_trip() {
        let doc = SedDocument::new(1, 4);
        let xml = write_sedml_string(&doc).unwrap();
        assert!(xml.contains("level=\"1\""));
        assert!(xml.contains("version=\"4\""));

        let reread = read_sedml_string(&xml).unwrap();
        assert_eq!(reread.num_errors(), 0);
        assert!(reread.models().is_empty());
    }
}
