mod mock_transport;

use std::sync::Arc;

use rest_table_mvu::{
    create_test_spawner, Node, Spawner, TableWidget, TestRenderer, TestWidgetDriver,
    TestWidgetRuntime, WidgetConfig, WidgetState,
};
pub(crate) use mock_transport::*;

mod fetch_scenario_tests;
mod overlapping_fetch_tests;
mod reduction_tests;

pub(crate) struct WidgetTest<Spawn: Spawner> {
    pub(crate) driver: TestWidgetDriver<WidgetState, Node, TableWidget, TestRenderer<Node>, Spawn>,
    pub(crate) renders: TestRenderer<Node>,
}

pub(crate) fn build_widget_test(
    transport: MockTransport,
) -> WidgetTest<fn(std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>)> {
    build_widget_test_with(WidgetConfig::default(), transport, create_test_spawner())
}

pub(crate) fn build_widget_test_with<Spawn: Spawner>(
    config: WidgetConfig,
    transport: MockTransport,
    spawner: Spawn,
) -> WidgetTest<Spawn> {
    let renders = TestRenderer::new();
    let widget = TableWidget::new(&config, Arc::new(transport));
    let initial_state = widget.initial_state();

    let runtime = TestWidgetRuntime::new(initial_state, widget, renders.clone(), spawner);
    let driver = runtime.run();

    WidgetTest { driver, renders }
}
