//! Static narration shown alongside each step of a layer's sequence.

use crate::domain::{Layer, Step, STEPS_PER_SEQUENCE};

const PERCEPTION: [&str; STEPS_PER_SEQUENCE as usize] = [
    "The Perception Layer is where data collection begins. Sensors throughout the city gather environmental data.",
    "Sensors are collecting temperature (25°C), humidity (50%), and light intensity (800 lux) data in real-time.",
    "The collected data is being packaged for transmission through the network. Each sensor has a unique identifier.",
    "Data packets are now ready to be sent to the Network Layer. The packets include timestamp and location data.",
];

const NETWORK: [&str; STEPS_PER_SEQUENCE as usize] = [
    "The Network Layer handles data transmission across the city's infrastructure using various communication protocols.",
    "Data packets from sensors are being transmitted through wireless networks, fiber optics, and cellular networks.",
    "The network ensures reliable delivery of data from sensors to processing centers with error correction and packet routing.",
    "Data has been successfully transmitted and is ready for processing in the Middleware Layer. Network latency: 5ms.",
];

const MIDDLEWARE: [&str; STEPS_PER_SEQUENCE as usize] = [
    "The Middleware Layer is responsible for processing and analyzing the raw sensor data using advanced algorithms.",
    "Data is being filtered, aggregated, and analyzed to extract meaningful insights. Anomalies are being detected.",
    "Machine learning models are processing the data to identify patterns and predict future conditions in the city.",
    "Processing complete. The analyzed data is now ready for visualization in the Application Layer. 3 insights generated.",
];

const APPLICATION: [&str; STEPS_PER_SEQUENCE as usize] = [
    "The Application Layer presents the processed data in a user-friendly interface for city administrators and citizens.",
    "Dashboards and visualizations are being generated based on the processed data from all city sensors.",
    "Users can now monitor real-time city metrics, receive alerts, and make data-driven decisions for city management.",
    "The complete data flow cycle is finished. The Smart City is now operating efficiently based on real-time data.",
];

/// Captions under the sequence progress bar, left to right.
pub const PHASE_CAPTIONS: [&str; 3] = ["Data Collection", "Processing", "Complete"];

pub fn describe(layer: Layer, step: Step) -> &'static str {
    let table = match layer {
        Layer::Perception => &PERCEPTION,
        Layer::Network => &NETWORK,
        Layer::Middleware => &MIDDLEWARE,
        Layer::Application => &APPLICATION,
    };
    table[usize::from(step.index())]
}
